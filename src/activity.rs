use std::sync::Arc;

use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::error;

use crate::{geo::IpInspector, state::AppState};

/// Which log table a successful operation lands in, and the name its
/// timestamp column carries there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    Register,
    Login,
}

impl LogEvent {
    pub fn table(self) -> &'static str {
        match self {
            Self::Register => "logs_register",
            Self::Login => "logs_login",
        }
    }

    pub fn time_column(self) -> &'static str {
        match self {
            Self::Register => "created_at",
            Self::Login => "login_at",
        }
    }
}

/// Best-effort, fire-and-forget. The spawned task resolves the public IP,
/// asks the reputation service for a proxy verdict, and appends the entry;
/// the response path never awaits it and never sees its failures.
pub fn record(state: &AppState, email: &str, at: OffsetDateTime, event: LogEvent) {
    let db = state.db.clone();
    let geo = Arc::clone(&state.geo);
    let email = email.to_owned();
    tokio::spawn(async move {
        if let Err(e) = insert_entry(&db, geo.as_ref(), &email, at, event).await {
            error!(
                error = %e,
                table = event.table(),
                column = event.time_column(),
                %email,
                "activity log write failed"
            );
        }
    });
}

async fn insert_entry(
    db: &PgPool,
    geo: &dyn IpInspector,
    email: &str,
    at: OffsetDateTime,
    event: LogEvent,
) -> anyhow::Result<()> {
    let ip = geo.public_ip().await?;
    let proxy = if geo.is_proxy(&ip).await? {
        "True"
    } else {
        "False"
    };

    match event {
        LogEvent::Register => {
            sqlx::query(
                "INSERT INTO logs_register (email, ip, created_at, proxy) VALUES ($1, $2, $3, $4)",
            )
        }
        LogEvent::Login => {
            sqlx::query(
                "INSERT INTO logs_login (email, ip, login_at, proxy) VALUES ($1, $2, $3, $4)",
            )
        }
    }
    .bind(email)
    .bind(&ip)
    .bind(at)
    .bind(proxy)
    .execute(db)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_map_to_their_table_and_column() {
        assert_eq!(LogEvent::Register.table(), "logs_register");
        assert_eq!(LogEvent::Register.time_column(), "created_at");
        assert_eq!(LogEvent::Login.table(), "logs_login");
        assert_eq!(LogEvent::Login.time_column(), "login_at");
    }
}
