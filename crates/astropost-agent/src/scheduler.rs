// SPDX-FileCopyrightText: 2026 Astropost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recurring-time scheduler for the posting loop.
//!
//! A post kind is due when the local clock sits inside its eligibility
//! window: the configured hour, with the minute below `window_minutes`.
//! Each (date, hour) slot fires at most once per kind; the record of the
//! last fired slot is what suppresses duplicates, so the loop itself can
//! tick as often as it likes. At most one kind fires per tick, in a fixed
//! priority order.

use std::sync::Arc;
use std::time::Duration;

use astropost_core::traits::ConnectivityProbe;
use astropost_core::types::PostKind;
use astropost_config::ScheduleConfig;
use chrono::{DateTime, Local, NaiveDate, Timelike};
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::content::ContentGenerator;
use crate::delivery::DeliveryPipeline;

/// Eligibility windows for the four post kinds.
#[derive(Debug, Clone)]
pub struct ScheduleWindows {
    pub morning_hour: u32,
    pub zodiac_hour: u32,
    pub night_hour: u32,
    pub fact_every_hours: u32,
    pub window_minutes: u32,
}

impl From<&ScheduleConfig> for ScheduleWindows {
    fn from(cfg: &ScheduleConfig) -> Self {
        Self {
            morning_hour: cfg.morning_hour,
            zodiac_hour: cfg.zodiac_hour,
            night_hour: cfg.night_hour,
            fact_every_hours: cfg.fact_every_hours,
            window_minutes: cfg.window_minutes,
        }
    }
}

/// The (date, hour) slot a kind last fired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredSlot {
    pub date: NaiveDate,
    pub hour: u32,
}

impl FiredSlot {
    fn of(now: &DateTime<Local>) -> Self {
        Self {
            date: now.date_naive(),
            hour: now.hour(),
        }
    }
}

/// Per-kind record of the last slot that produced a post.
#[derive(Debug, Default, Clone)]
pub struct LastFired {
    morning: Option<FiredSlot>,
    zodiac: Option<FiredSlot>,
    fact: Option<FiredSlot>,
    night: Option<FiredSlot>,
}

impl LastFired {
    fn get(&self, kind: PostKind) -> Option<FiredSlot> {
        match kind {
            PostKind::Morning => self.morning,
            PostKind::DailyZodiac => self.zodiac,
            PostKind::Fact => self.fact,
            PostKind::NightWish => self.night,
        }
    }

    fn record(&mut self, kind: PostKind, slot: FiredSlot) {
        let entry = match kind {
            PostKind::Morning => &mut self.morning,
            PostKind::DailyZodiac => &mut self.zodiac,
            PostKind::Fact => &mut self.fact,
            PostKind::NightWish => &mut self.night,
        };
        *entry = Some(slot);
    }
}

/// Picks the highest-priority kind due at `now`, if any.
///
/// Order: morning, night wish, daily zodiac, fact. Kinds that already
/// fired in the current (date, hour) slot are skipped.
pub fn due_kind(
    windows: &ScheduleWindows,
    now: &DateTime<Local>,
    last: &LastFired,
) -> Option<PostKind> {
    if now.minute() >= windows.window_minutes {
        return None;
    }
    let slot = FiredSlot::of(now);
    let hour = now.hour();

    let candidates = [
        (PostKind::Morning, hour == windows.morning_hour),
        (PostKind::NightWish, hour == windows.night_hour),
        (PostKind::DailyZodiac, hour == windows.zodiac_hour),
        (
            PostKind::Fact,
            windows.fact_every_hours > 0 && hour % windows.fact_every_hours == 0,
        ),
    ];

    candidates
        .into_iter()
        .find(|(kind, in_window)| *in_window && last.get(*kind) != Some(slot))
        .map(|(kind, _)| kind)
}

pub struct Scheduler {
    windows: ScheduleWindows,
    content: Arc<ContentGenerator>,
    pipeline: Arc<DeliveryPipeline>,
    probe: Arc<dyn ConnectivityProbe>,
    poll_interval: Duration,
    offline_retry: Duration,
    last_fired: LastFired,
}

impl Scheduler {
    pub fn new(
        cfg: &ScheduleConfig,
        content: Arc<ContentGenerator>,
        pipeline: Arc<DeliveryPipeline>,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            windows: ScheduleWindows::from(cfg),
            content,
            pipeline,
            probe,
            poll_interval: Duration::from_secs(cfg.poll_interval_secs),
            offline_retry: Duration::from_secs(cfg.offline_retry_secs),
            last_fired: LastFired::default(),
        }
    }

    /// Runs the posting loop until the token is cancelled.
    pub async fn run(mut self, token: CancellationToken) {
        info!("posting loop started");
        loop {
            let pause = select! {
                _ = token.cancelled() => break,
                pause = self.step() => pause,
            };
            select! {
                _ = token.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }
        info!("posting loop stopped");
    }

    /// One pass of the loop; returns how long to wait before the next.
    async fn step(&mut self) -> Duration {
        if !self.probe.is_online().await {
            warn!("no connectivity, deferring schedule check");
            return self.offline_retry;
        }
        self.tick_at(Local::now()).await;
        self.poll_interval
    }

    /// Fires the due kind for `now`, if there is one.
    async fn tick_at(&mut self, now: DateTime<Local>) {
        let Some(kind) = due_kind(&self.windows, &now, &self.last_fired) else {
            debug!("nothing due");
            return;
        };

        info!(%kind, "post is due");
        let Some(post) = self.content.generate(kind).await else {
            // Generation failed; leave the slot unrecorded so the next
            // tick inside the window tries again.
            return;
        };

        self.last_fired.record(kind, FiredSlot::of(&now));
        let outcome = self.pipeline.deliver(post).await;
        debug!(%kind, ?outcome, "tick finished");
    }
}
