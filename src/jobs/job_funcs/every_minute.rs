use std::sync::Arc;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, Timelike, Utc};
use tracing::{error, info};

use crate::{init::state::ServerState, util::time::duration_formatter::format_dt_difference};

/// Wait before retrying when the next run time cannot be computed.
const RESCHEDULE_BACKOFF: std::time::Duration = std::time::Duration::from_secs(10);

/// The first instant strictly after `now` that sits `second_offset` seconds and
/// `millisecond_offset` milliseconds into a minute.
pub fn next_scheduled_mark(
    now: DateTime<Utc>,
    second_offset: u32,
    millisecond_offset: u32,
) -> Result<DateTime<Utc>> {
    if second_offset >= 60 || millisecond_offset >= 1000 {
        return Err(anyhow!(
            "Offset {second_offset}s {millisecond_offset}ms does not fit in a minute"
        ));
    }

    let minute_start = now
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .ok_or_else(|| anyhow!("Could not truncate {now} to the minute"))?;

    let mark = minute_start
        + Duration::seconds(i64::from(second_offset))
        + Duration::milliseconds(i64::from(millisecond_offset));

    Ok(if mark <= now {
        mark + Duration::minutes(1)
    } else {
        mark
    })
}

/// Sleep duration until the next mark, plus a log line announcing it.
pub fn next_scheduled_delay(
    task_descriptor: &str,
    second_offset: u32,
    millisecond_offset: u32,
) -> Result<(tokio::time::Duration, String)> {
    let now = Utc::now();
    let next_mark = next_scheduled_mark(now, second_offset, millisecond_offset)?;

    let delay = (next_mark - now)
        .to_std()
        .map_err(|e| anyhow!("Negative delay until {next_mark}: {e:?}"))?;

    Ok((
        delay,
        format!(
            "Task '{task_descriptor}' will run in {}",
            format_dt_difference(now, next_mark)
        ),
    ))
}

/// Runs `task` once a minute at the given offset, forever.
pub async fn schedule_task_every_minute_at<F, Fut>(
    state: Arc<ServerState>,
    task: F,
    task_descriptor: String,
    second_offset: u32,
    millisecond_offset: u32,
) where
    F: Fn(Arc<ServerState>) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    loop {
        let (delay, schedule_message) =
            match next_scheduled_delay(&task_descriptor, second_offset, millisecond_offset) {
                Ok(next) => next,
                Err(e) => {
                    error!(task = %task_descriptor, error = ?e, "Could not compute next run");
                    tokio::time::sleep(RESCHEDULE_BACKOFF).await;
                    continue;
                }
            };

        tracing::debug!("{schedule_message}");
        tokio::time::sleep(delay).await;

        let started = tokio::time::Instant::now();
        task(Arc::clone(&state)).await;
        info!(task = %task_descriptor, duration = ?started.elapsed(), "Scheduled task finished");
    }
}
