// src/log_store.rs

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{
    Event, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{Layer, layer::Context};

const CREATE_LOGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
        level TEXT,
        message TEXT
    )
"#;

/// One tracing event as stored in the `logs` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
}

/// Opens the log database at `dir/file`, creating the directory, the file and
/// the `logs` table as needed.
pub async fn open(dir: &Path, file: &str) -> Result<SqlitePool, sqlx::Error> {
    std::fs::create_dir_all(dir)?;

    let options = SqliteConnectOptions::new()
        .filename(dir.join(file))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query(CREATE_LOGS_TABLE).execute(&pool).await?;
    Ok(pool)
}

pub async fn insert(pool: &SqlitePool, record: &LogRecord) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO logs (timestamp, level, message) VALUES (?, ?, ?)")
        .bind(record.timestamp)
        .bind(&record.level)
        .bind(&record.message)
        .execute(pool)
        .await?;
    Ok(())
}

/// Drains `records` into the `logs` table until every layer holding the
/// sending half is dropped.
pub async fn write_records(pool: SqlitePool, mut records: UnboundedReceiver<LogRecord>) {
    while let Some(record) = records.recv().await {
        if let Err(e) = insert(&pool, &record).await {
            // Not through tracing: the event would be routed back here.
            eprintln!("Failed to persist log record: {}", e);
        }
    }
}

/// `tracing` layer forwarding every event to [`write_records`].
///
/// The layer never blocks on the database; events are queued on an unbounded
/// channel. Events emitted by `sqlx` itself are ignored.
pub struct SqliteLogLayer {
    sender: UnboundedSender<LogRecord>,
}

impl SqliteLogLayer {
    pub fn new() -> (Self, UnboundedReceiver<LogRecord>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl<S: Subscriber> Layer<S> for SqliteLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target().starts_with("sqlx") {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let _ = self.sender.send(LogRecord {
            timestamp: Utc::now(),
            level: metadata.level().to_string(),
            message: visitor.finish(),
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
                .trim_start()
                .to_string()
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[tokio::test]
    async fn events_are_written_to_the_logs_table() {
        let dir = tempfile::tempdir().unwrap();
        let db_dir = dir.path().join("db");
        let pool = open(&db_dir, "wlingo.db").await.unwrap();
        assert!(db_dir.join("wlingo.db").is_file());

        let (layer, records) = SqliteLogLayer::new();
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Loaded {} words from {}", 3, "animals");
            tracing::warn!(topic = "x", "No CSV files found");
            tracing::debug!(target: "sqlx::query", "select 1");
        });

        // The subscriber, and with it the sender, is gone; this returns once
        // the queue is drained.
        write_records(pool.clone(), records).await;

        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT level, message FROM logs ORDER BY id")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(
            rows,
            vec![
                ("INFO".to_string(), "Loaded 3 words from animals".to_string()),
                ("WARN".to_string(), "No CSV files found topic=x".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn reopening_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let pool = open(dir.path(), "logs.db").await.unwrap();
        insert(
            &pool,
            &LogRecord {
                timestamp: Utc::now(),
                level: "ERROR".to_string(),
                message: "boom".to_string(),
            },
        )
        .await
        .unwrap();
        pool.close().await;

        let pool = open(dir.path(), "logs.db").await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM logs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
