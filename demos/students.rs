//! Routes student record messages to handlers that decode their payload.
//!
//! Run with `RUST_LOG=segroute=debug cargo run --example students` to see
//! route registration.

use segroute::codec::{CodecRegistry, APPLICATION_JSON};
use segroute::{FireError, Router};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Serialize, Deserialize, Debug)]
struct Score {
    course: String,
    points: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "students=info,segroute=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let codecs = Arc::new(CodecRegistry::with_builtins());
    let inbox: Arc<Mutex<Vec<u8>>> = Arc::default();

    let mut router: Router = Router::new();

    router.route("students.{id}", |ctx| {
        tracing::info!(id = ctx.variable_or_default("id", "?"), "student lookup");
        Ok(())
    })?;

    let (payload, scores) = (inbox.clone(), codecs.clone());
    router.route_fmt(
        "students.{id}.courses.{}.score",
        &[&"{course}"],
        move |ctx| {
            let raw = payload.lock().map_err(|_| "inbox poisoned")?;
            let score: Score = scores.decode(APPLICATION_JSON, &raw)?;
            tracing::info!(
                id = ctx.variable_or_default("id", "?"),
                course = %ctx.variable_or_compute("course", || score.course.clone()),
                points = score.points,
                "score received"
            );
            Ok(())
        },
    )?;

    router.reserve("students.top")?;

    let score = Score {
        course: "cs101".into(),
        points: 93,
    };
    *inbox.lock().map_err(|_| "inbox poisoned")? = codecs.encode(APPLICATION_JSON, &score)?;

    router.fire("students.2020")?;
    router.fire("students/2020/courses/cs101/score")?;

    for path in ["students.top", "teachers.7"] {
        match router.fire(path) {
            Err(FireError::NoHandler { path }) => tracing::warn!(%path, "route is reserved"),
            Err(FireError::NoRoute { path }) => tracing::warn!(%path, "no route"),
            other => other?,
        }
    }

    Ok(())
}
