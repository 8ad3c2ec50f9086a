use crate::db::models::{ContactMessage, NewContactMessage};
use crate::db::schema::SQLITE_INIT;
use crate::error::LoongesError;
use chrono::{SecondsFormat, SubsecRound, Utc};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a contact message and return the stored row.
    Insert(
        NewContactMessage,
        RpcReplyPort<Result<ContactMessage, LoongesError>>,
    ),

    /// List every contact message, newest first.
    List(RpcReplyPort<Result<Vec<ContactMessage>, LoongesError>>),

    /// Get a contact message by id.
    Get(i64, RpcReplyPort<Result<Option<ContactMessage>, LoongesError>>),

    /// Delete a contact message by id, replying with the number of rows removed.
    Delete(i64, RpcReplyPort<Result<u64, LoongesError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn insert_message(
        &self,
        new: NewContactMessage,
    ) -> Result<ContactMessage, LoongesError> {
        ractor::call!(self.actor, DbActorMessage::Insert, new)
            .map_err(|e| LoongesError::RactorError(format!("DbActor Insert RPC failed: {e}")))?
    }

    pub async fn list_messages(&self) -> Result<Vec<ContactMessage>, LoongesError> {
        ractor::call!(self.actor, DbActorMessage::List)
            .map_err(|e| LoongesError::RactorError(format!("DbActor List RPC failed: {e}")))?
    }

    pub async fn get_message(&self, id: i64) -> Result<Option<ContactMessage>, LoongesError> {
        ractor::call!(self.actor, DbActorMessage::Get, id)
            .map_err(|e| LoongesError::RactorError(format!("DbActor Get RPC failed: {e}")))?
    }

    /// Idempotent: deleting an unknown id yields `Ok(0)`.
    pub async fn delete_message(&self, id: i64) -> Result<u64, LoongesError> {
        ractor::call!(self.actor, DbActorMessage::Delete, id)
            .map_err(|e| LoongesError::RactorError(format!("DbActor Delete RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        if let Some(parent) = connect_opts
            .get_filename()
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ActorProcessingErr::from(format!(
                    "failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Insert(new, reply) => {
                let res = self.insert_message(&state.pool, new).await;
                let _ = reply.send(res);
            }
            DbActorMessage::List(reply) => {
                let res = self.list_messages(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Get(id, reply) => {
                let res = self.get_message(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(id, reply) => {
                let res = self.delete_message(&state.pool, id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn insert_message(
        &self,
        pool: &SqlitePool,
        new: NewContactMessage,
    ) -> Result<ContactMessage, LoongesError> {
        // Whole seconds, like SQL CURRENT_TIMESTAMP; ties are ordered by id.
        let now = Utc::now()
            .trunc_subsecs(0)
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
        INSERT INTO contact_messages (name, email, message, timestamp)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, email, message, timestamp
        "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.message)
        .bind(now)
        .fetch_one(pool)
        .await?;

        debug!(id = row.id, "contact message stored");
        Ok(row)
    }

    async fn list_messages(&self, pool: &SqlitePool) -> Result<Vec<ContactMessage>, LoongesError> {
        // Ordered by the stored timestamp first; a wall clock stepping back
        // can therefore place a later insert below an earlier one.
        let rows = sqlx::query_as::<_, ContactMessage>(
            r#"
        SELECT id, name, email, message, timestamp
        FROM contact_messages
        ORDER BY timestamp DESC, id DESC
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn get_message(
        &self,
        pool: &SqlitePool,
        id: i64,
    ) -> Result<Option<ContactMessage>, LoongesError> {
        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
        SELECT id, name, email, message, timestamp
        FROM contact_messages
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn delete_message(&self, pool: &SqlitePool, id: i64) -> Result<u64, LoongesError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// The actor is unnamed so several stores can coexist in one process.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, LoongesError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| LoongesError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), LoongesError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
