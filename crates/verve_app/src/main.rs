//! Verve Showcase
//!
//! A headless tour of the Verve crates:
//! - Typing headline with a blinking cursor
//! - Staggered list reveal and a pulsing badge, driven frame by frame
//! - Responsive grid resolution across viewport widths
//! - A cached fetch round against a flaky simulated endpoint
//!
//! Run with: cargo run -p verve_app

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use verve_animation::{AnimationScheduler, ManualClock};
use verve_fetch::{CachePolicy, FetchError, Fetcher, RequestCache, RequestKey};
use verve_motion::{Pulse, StaggerConfig, StaggeredReveal, TypingText};
use verve_responsive::{GridSpec, Viewport};

const FRAME_MS: u64 = 16;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    motion_demo();
    responsive_demo();
    fetch_demo().await?;

    Ok(())
}

/// Drive a typing headline, a staggered list, and a pulse badge through a
/// simulated frame loop on a manual clock.
fn motion_demo() {
    println!("== motion ==");

    let clock = ManualClock::new();
    let scheduler = AnimationScheduler::with_clock(Arc::new(clock.clone()));
    let handle = scheduler.handle();

    let mut headline = TypingText::new("Welcome to Verve").interval(40.0);
    headline.start();

    let mut list =
        StaggeredReveal::new(&handle, 4, StaggerConfig::new(100.0, 80.0)).duration(240.0);
    list.start();

    let mut badge = Pulse::new(&handle).range(1.0, 1.08).period(600.0);
    badge.start();

    for frame in 0u64..60 {
        clock.advance_ms(FRAME_MS);
        scheduler.tick();
        headline.update(FRAME_MS as f32);

        if frame % 12 == 11 {
            let opacities: Vec<String> = list
                .samples()
                .map(|item| format!("{:.2}", item.opacity))
                .collect();
            println!(
                "t={:4}ms  \"{}{}\"  list=[{}]  badge x{:.3}",
                (frame + 1) * FRAME_MS,
                headline.visible(),
                if headline.cursor_visible() { "|" } else { " " },
                opacities.join(", "),
                badge.sample().scale,
            );
        }
    }

    println!(
        "headline done: {}  list complete: {}  badge active: {}",
        headline.is_done(),
        list.is_complete(),
        badge.is_active(),
    );

    // The badge would pulse forever; dropping it vacates its slot.
    drop(badge);
    scheduler.tick();
    println!(
        "after dropping the badge, active animations: {}",
        scheduler.has_active_animations(),
    );
}

/// Resolve the default grid at a few viewport widths.
fn responsive_demo() {
    println!("\n== responsive ==");

    let grid = GridSpec::default();
    for width in [390.0, 820.0, 1280.0, 1600.0] {
        let viewport = Viewport::new(width);
        let bucket = viewport.bucket();
        let max_width = grid
            .max_width_at(bucket)
            .map(|px| format!("{px}px max"))
            .unwrap_or_else(|| "uncapped".to_string());
        println!(
            "{:6}px -> {:?}: {} columns, {}px gutter, {}",
            width,
            bucket,
            grid.columns_at(bucket),
            grid.gutter_at(bucket),
            max_width,
        );
    }
}

/// One cached fetch round: a flaky endpoint that needs the retry budget,
/// then a warm hit that never touches the network.
async fn fetch_demo() -> Result<()> {
    println!("\n== fetch ==");

    let policy = CachePolicy::default().retry_delay(Duration::from_millis(50));
    let cache = RequestCache::new(policy);
    let feed = FlakyFeed {
        calls: AtomicU32::new(0),
    };

    let items = cache.get_with(&feed).await?;
    println!(
        "fetched {} items in {} attempts",
        items.len(),
        feed.calls.load(Ordering::SeqCst),
    );

    let again = cache.get_with(&feed).await?;
    println!(
        "warm hit: {} items, attempts still {}, freshness {:?}",
        again.len(),
        feed.calls.load(Ordering::SeqCst),
        cache.freshness(&feed.key()),
    );

    Ok(())
}

/// Simulated feed endpoint that fails twice before responding.
struct FlakyFeed {
    calls: AtomicU32,
}

#[async_trait]
impl Fetcher for FlakyFeed {
    type Output = Vec<String>;

    async fn fetch(&self) -> Result<Vec<String>, FetchError> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt < 3 {
            return Err(FetchError::from_status(503, "feed warming up"));
        }

        Ok(vec![
            "Ship the new onboarding flow".to_string(),
            "Refresh the billing screens".to_string(),
            "Tune the pulse badge timing".to_string(),
        ])
    }

    fn key(&self) -> RequestKey {
        RequestKey::new("feed", "home")
    }
}
