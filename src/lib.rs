//! strokewatch - client for a stroke-risk prediction backend
//!
//! Typed requests for the backend's prediction, chatbot, planner and caregiver
//! alert endpoints, plus UI-toolkit-independent components that render each
//! response into a display region.
//!
//! # Example
//!
//! ```no_run
//! use strokewatch::app::StrokeApp;
//! use strokewatch::client::PlannerKind;
//! use strokewatch::config::StrokewatchConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StrokewatchConfig::default();
//! let app = StrokeApp::from_config(&config)?;
//!
//! let kind: PlannerKind = "food".parse()?;
//! let submission = app.planner.recommend(&kind, "vegetarian, 55 years old").await;
//! println!("{}", submission.outcome.text());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod display;
pub mod logging;
