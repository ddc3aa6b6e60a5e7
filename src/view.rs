//! Page state as data: a `Model` advanced only through `update`.
//!
//! Every submit bumps `generation`; a lookup result carrying an older
//! generation is dropped so a slow response never replaces a newer one.

use crate::models::ActivitySummary;
use crate::source::LookupError;

#[derive(Debug, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading {
        handle: String,
    },
    Loaded(ActivitySummary),
    Failed {
        handle: String,
        error: LookupError,
    },
}

#[derive(Debug, Default)]
pub struct Model {
    pub input: String,
    pub phase: Phase,
    pub generation: u64,
}

#[derive(Debug)]
pub enum Msg {
    Submit(String),
    Loaded {
        generation: u64,
        result: Result<ActivitySummary, LookupError>,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    None,
    Fetch { generation: u64, handle: String },
}

pub fn update(mut model: Model, msg: Msg) -> (Model, Command) {
    match msg {
        Msg::Submit(raw) => {
            let handle = raw.trim().to_string();
            model.input = raw;
            if handle.is_empty() {
                return (model, Command::None);
            }
            model.generation += 1;
            model.phase = Phase::Loading {
                handle: handle.clone(),
            };
            let generation = model.generation;
            (model, Command::Fetch { generation, handle })
        }
        Msg::Loaded { generation, result } => {
            if generation != model.generation {
                return (model, Command::None);
            }
            let handle = match &model.phase {
                Phase::Loading { handle } => handle.clone(),
                _ => return (model, Command::None),
            };
            model.phase = match result {
                Ok(summary) => Phase::Loaded(summary),
                Err(error) => Phase::Failed { handle, error },
            };
            (model, Command::None)
        }
    }
}

impl Model {
    pub fn summary(&self) -> Option<&ActivitySummary> {
        match &self.phase {
            Phase::Loaded(summary) => Some(summary),
            _ => None,
        }
    }

    /// Handle to mirror into the `user` query parameter.
    pub fn current_handle(&self) -> Option<&str> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Loading { handle } | Phase::Failed { handle, .. } => Some(handle),
            Phase::Loaded(summary) => Some(&summary.username),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(handle: &str) -> ActivitySummary {
        ActivitySummary {
            username: handle.to_string(),
            today: 1,
            streak: 0,
            stage: 1,
            total_last_year: 10,
            recent: Vec::new(),
            as_of: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        }
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let (model, cmd) = update(Model::default(), Msg::Submit("   ".into()));
        assert_eq!(cmd, Command::None);
        assert_eq!(model.generation, 0);
        assert!(matches!(model.phase, Phase::Idle));
    }

    #[test]
    fn submit_trims_and_requests_fetch() {
        let (model, cmd) = update(Model::default(), Msg::Submit("  octocat \n".into()));
        assert_eq!(
            cmd,
            Command::Fetch {
                generation: 1,
                handle: "octocat".into()
            }
        );
        assert_eq!(model.current_handle(), Some("octocat"));
    }

    #[test]
    fn result_for_current_generation_is_shown() {
        let (model, _) = update(Model::default(), Msg::Submit("octocat".into()));
        let (model, cmd) = update(
            model,
            Msg::Loaded {
                generation: 1,
                result: Ok(summary("octocat")),
            },
        );
        assert_eq!(cmd, Command::None);
        assert_eq!(model.summary().map(|s| s.username.as_str()), Some("octocat"));
    }

    #[test]
    fn stale_result_is_dropped() {
        let (model, _) = update(Model::default(), Msg::Submit("first".into()));
        let (model, _) = update(model, Msg::Submit("second".into()));

        let (model, _) = update(
            model,
            Msg::Loaded {
                generation: 1,
                result: Ok(summary("first")),
            },
        );
        assert!(matches!(&model.phase, Phase::Loading { handle } if handle == "second"));

        let (model, _) = update(
            model,
            Msg::Loaded {
                generation: 2,
                result: Ok(summary("second")),
            },
        );
        assert_eq!(model.current_handle(), Some("second"));

        let (model, _) = update(
            model,
            Msg::Loaded {
                generation: 2,
                result: Err(LookupError::NotFound("second".into())),
            },
        );
        assert!(model.summary().is_some());
    }

    #[test]
    fn failure_keeps_handle_for_display() {
        let (model, _) = update(Model::default(), Msg::Submit("ghost".into()));
        let (model, _) = update(
            model,
            Msg::Loaded {
                generation: 1,
                result: Err(LookupError::NotFound("ghost".into())),
            },
        );
        assert!(matches!(
            &model.phase,
            Phase::Failed { handle, error: LookupError::NotFound(_) } if handle == "ghost"
        ));
    }
}
