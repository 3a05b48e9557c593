//! Run proposal use case.
//!
//! Drives one proposal run: goal, then repeated
//! orchestrate / veto / terminate / execute rounds until the orchestrator
//! says `done`, the terminator stops the run, or the iteration ceiling is hit.
//! If no draft has been written by the last allowed iteration, that
//! iteration runs `write` without consulting the model-backed services.

mod types;

pub use types::{RunProposalInput, RunProposalOutput, StopReason};

use crate::actions::ActionDispatcher;
use crate::config::AgentParams;
use crate::error::AgentError;
use crate::ports::action_store::ActionStore;
use crate::ports::llm_client::LlmClient;
use crate::ports::run_event_logger::{NoRunEventLogger, RunEvent, RunEventLogger};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::services::goal::GoalService;
use crate::services::orchestrator::Orchestrator;
use crate::services::shared::{check_cancelled, run_cancellable};
use crate::services::skipper::Skipper;
use crate::services::summarizer::{CompactionBackoff, HistorySummarizer};
use crate::services::terminator::Terminator;
use proposal_domain::{ActionDecision, ActionKind, RunState, TerminationDecision};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome of the selection step of one iteration.
enum Selection {
    Run(ActionKind),
    Stop(StopReason),
}

/// Use case for running the proposal agent loop
pub struct RunProposalUseCase<L: LlmClient + 'static, S: ActionStore + 'static> {
    goal: GoalService<L>,
    orchestrator: Orchestrator<L>,
    skipper: Skipper<L>,
    terminator: Terminator<L>,
    summarizer: HistorySummarizer<L>,
    dispatcher: ActionDispatcher,
    store: Arc<S>,
    event_logger: Arc<dyn RunEventLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<L: LlmClient + 'static, S: ActionStore + 'static> RunProposalUseCase<L, S> {
    /// Wires the loop services and the standard executors from `params`.
    pub fn new<T: ToolExecutorPort + 'static>(
        llm: Arc<L>,
        tools: Arc<T>,
        store: Arc<S>,
        params: &AgentParams,
    ) -> Result<Self, AgentError> {
        let dispatcher = ActionDispatcher::standard(llm.clone(), tools, params)?;
        Ok(Self::with_dispatcher(llm, dispatcher, store, params))
    }

    /// Same as [`Self::new`] with a caller-built dispatch table.
    pub fn with_dispatcher(
        llm: Arc<L>,
        dispatcher: ActionDispatcher,
        store: Arc<S>,
        params: &AgentParams,
    ) -> Self {
        let decision = params.models.decision.clone();
        let summarizer_model = params.models.summarizer.clone();
        let threshold = params.summarize_thresholds.threshold_for(&summarizer_model);

        Self {
            goal: GoalService::new(llm.clone(), decision.clone())
                .with_temperature(params.temperature),
            orchestrator: Orchestrator::new(llm.clone(), decision.clone())
                .with_catalog(params.search_mode.catalog())
                .with_temperature(params.temperature),
            skipper: Skipper::new(llm.clone(), decision.clone())
                .with_temperature(params.temperature),
            terminator: Terminator::new(llm.clone(), decision)
                .with_max_iterations(params.max_iterations)
                .with_temperature(params.temperature),
            summarizer: HistorySummarizer::new(llm, summarizer_model)
                .with_threshold(threshold)
                .with_temperature(params.temperature),
            dispatcher,
            store,
            event_logger: Arc::new(NoRunEventLogger),
            cancellation_token: None,
        }
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn RunEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Set a cancellation token for graceful shutdown
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    fn emit(&self, event_type: &'static str, payload: serde_json::Value) {
        self.event_logger.log(RunEvent::new(event_type, payload));
    }

    /// Execute the run.
    pub async fn execute(&self, input: RunProposalInput) -> Result<RunProposalOutput, AgentError> {
        check_cancelled(&self.cancellation_token)?;
        let token = self.cancellation_token.clone().unwrap_or_default();
        let mut state = input.into_state();
        let problem_id = state.problem().id.clone();

        info!(
            "Starting proposal run for {} ({})",
            problem_id,
            state.problem().title
        );
        self.emit(
            "run_started",
            json!({
                "problem_id": problem_id.as_str(),
                "title": state.problem().title,
                "max_iterations": self.terminator.max_iterations(),
                "internal_search": state.job().enable_internal_search,
            }),
        );

        if state.goal().trim().is_empty() {
            let goal =
                run_cancellable(&self.cancellation_token, self.goal.generate_goal(&state)).await?;
            state.set_goal(goal);
        }
        self.emit("goal_set", json!({ "goal": state.goal() }));

        let mut records = Vec::new();
        let mut backoff = CompactionBackoff::default();
        let stop_reason = loop {
            check_cancelled(&self.cancellation_token)?;

            if self.terminator.is_ceiling_reached(&state) {
                let decision = TerminationDecision::ceiling_reached();
                info!(
                    "Stopping after {} iterations: {}",
                    state.completed_iterations(),
                    decision.reason
                );
                self.emit(
                    "run_terminated",
                    json!({ "reason": decision.reason, "ceiling": true }),
                );
                break StopReason::Terminated(decision.reason);
            }

            self.compact_if_needed(&mut state, &mut backoff).await?;

            let kind = if self.must_force_write(&state) {
                self.force_write(&mut state);
                ActionKind::Write
            } else {
                match self.select_action(&mut state).await? {
                    Selection::Run(kind) => kind,
                    Selection::Stop(reason) => break reason,
                }
            };

            info!(
                "Iteration {}/{}: executing {}",
                state.completed_iterations() + 1,
                self.terminator.max_iterations(),
                kind
            );
            let outcome = run_cancellable(
                &self.cancellation_token,
                self.dispatcher.execute(kind, &state, &token),
            )
            .await?;
            let record = self.store.create(outcome.record).await?;

            state.set_content(outcome.content);
            state.append_history(kind, record.output());
            state.complete_iteration(kind);
            debug!("Stored record {} for {}", record.id, kind);

            self.emit(
                "action_completed",
                json!({
                    "iteration": state.completed_iterations(),
                    "action": kind.as_str(),
                    "record_id": record.id.as_str(),
                    "output_chars": record.output().chars().count(),
                }),
            );
            records.push(record);
        };

        info!(
            "Proposal run finished after {} iterations: {}",
            state.completed_iterations(),
            stop_reason
        );
        self.emit(
            "run_finished",
            json!({
                "stop": stop_reason.as_str(),
                "reason": stop_reason.reason(),
                "iterations": state.completed_iterations(),
                "content_chars": state.content().chars().count(),
            }),
        );

        Ok(RunProposalOutput {
            goal: state.goal().to_string(),
            content: state.content().to_string(),
            history: state.history().to_string(),
            iterations: state.completed_iterations(),
            records,
            stop_reason,
        })
    }

    /// Orchestrator, skipper and terminator for one iteration.
    async fn select_action(&self, state: &mut RunState) -> Result<Selection, AgentError> {
        let decision = run_cancellable(
            &self.cancellation_token,
            self.orchestrator.select_next_action(state),
        )
        .await?;
        state.append_history(
            ActionKind::Orchestrator,
            &format!("{}: {}", decision.kind, decision.reason),
        );
        self.emit(
            "action_selected",
            json!({
                "iteration": state.completed_iterations() + 1,
                "action": decision.kind.as_str(),
                "reason": decision.reason,
            }),
        );

        if decision.kind.is_terminal() {
            info!("Orchestrator finished the run: {}", decision.reason);
            return Ok(Selection::Stop(StopReason::Done(decision.reason)));
        }

        let kind = self.resolve_action(state, decision.kind).await?;

        let termination = run_cancellable(
            &self.cancellation_token,
            self.terminator.should_terminate(state),
        )
        .await?;
        if termination.should_terminate {
            self.emit(
                "run_terminated",
                json!({ "reason": termination.reason, "ceiling": false }),
            );
            return Ok(Selection::Stop(StopReason::Terminated(termination.reason)));
        }
        Ok(Selection::Run(kind))
    }

    /// The last allowed iteration always produces a draft.
    fn must_force_write(&self, state: &RunState) -> bool {
        self.terminator.is_final_iteration(state)
            && !state.has_executed(ActionKind::Write)
            && self.dispatcher.supports(ActionKind::Write)
    }

    fn force_write(&self, state: &mut RunState) {
        let decision = ActionDecision::forced_write();
        info!(
            "Iteration {}/{} has no draft yet, forcing {}",
            state.completed_iterations() + 1,
            self.terminator.max_iterations(),
            decision.kind
        );
        state.append_history(
            ActionKind::Orchestrator,
            &format!("{}: {}", decision.kind, decision.reason),
        );
        self.emit(
            "write_forced",
            json!({
                "iteration": state.completed_iterations() + 1,
                "action": decision.kind.as_str(),
                "reason": decision.reason,
            }),
        );
    }

    /// Turns the orchestrator's choice into the action that will run.
    ///
    /// Kinds with no executor and skipper vetoes both route to the
    /// least-frequent fallback, which never repeats the rejected kind or its
    /// search family. The fallback is not re-checked.
    async fn resolve_action(
        &self,
        state: &mut RunState,
        kind: ActionKind,
    ) -> Result<ActionKind, AgentError> {
        let veto = if !kind.is_executable() || !self.dispatcher.supports(kind) {
            warn!("{} cannot be executed, using fallback", kind);
            format!("{} cannot be executed", kind)
        } else {
            let skip =
                run_cancellable(&self.cancellation_token, self.skipper.should_skip(state, kind))
                    .await?;
            if !skip.should_skip {
                return Ok(kind);
            }
            format!("skipped {}: {}", kind, skip.reason)
        };

        let fallback = self.orchestrator.fallback(state, kind);
        info!("{}; running {} instead", veto, fallback);
        state.append_history(
            ActionKind::Orchestrator,
            &format!("{}; running {} instead", veto, fallback),
        );
        self.emit(
            "action_skipped",
            json!({
                "action": kind.as_str(),
                "fallback": fallback.as_str(),
                "note": veto,
            }),
        );
        Ok(fallback)
    }

    async fn compact_if_needed(
        &self,
        state: &mut RunState,
        backoff: &mut CompactionBackoff,
    ) -> Result<(), AgentError> {
        let before = state.history().chars().count();
        if !backoff.should_attempt(before) {
            debug!("Skipping compaction until the history grows past the last failed attempt");
            return Ok(());
        }

        let needed = run_cancellable(
            &self.cancellation_token,
            self.summarizer.needs_compaction(state.history()),
        )
        .await?;
        if !needed {
            return Ok(());
        }

        let compacted =
            run_cancellable(&self.cancellation_token, self.summarizer.compact(state.history()))
                .await?;
        if compacted == state.history() {
            warn!("History of {} chars could not be compacted; backing off", before);
            backoff.record_stall(before);
            return Ok(());
        }
        backoff.reset();

        let after = compacted.chars().count();
        state.replace_history(compacted);
        self.emit(
            "history_compacted",
            json!({ "before_chars": before, "after_chars": after }),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummarizeThresholds;
    use crate::testing::{MemoryStore, MockLlm, MockTools, RecordingLogger, sample_state};
    use proposal_domain::{FORCED_WRITE_REASON, JobConfig, LOOP_CEILING_REASON, Problem};
    use serde_json::Value;
    use std::sync::atomic::Ordering;

    fn input(enable_internal_search: bool) -> RunProposalInput {
        let state = sample_state(enable_internal_search);
        RunProposalInput::new(state.problem().clone())
            .with_hearing(state.hearing().to_vec())
            .with_job(JobConfig::default().with_internal_search(enable_internal_search))
            .with_goal(state.goal())
    }

    fn pick(action: &str) -> Value {
        json!({ "action": action, "reason": format!("{action} is next") })
    }

    fn proceed() -> Value {
        json!({ "shouldSkip": false, "reason": "useful" })
    }

    fn keep_going() -> Value {
        json!({ "shouldTerminate": false, "reason": "draft incomplete" })
    }

    fn draft(text: &str) -> Value {
        json!({ "content": text, "changeReason": "first draft" })
    }

    fn use_case(
        llm: MockLlm,
        params: &AgentParams,
    ) -> (
        RunProposalUseCase<MockLlm, MemoryStore>,
        Arc<MockLlm>,
        Arc<MemoryStore>,
        Arc<RecordingLogger>,
    ) {
        let llm = Arc::new(llm);
        let store = Arc::new(MemoryStore::default());
        let logger = Arc::new(RecordingLogger::default());
        let use_case =
            RunProposalUseCase::new(llm.clone(), Arc::new(MockTools::new()), store.clone(), params)
                .unwrap()
                .with_event_logger(logger.clone());
        (use_case, llm, store, logger)
    }

    #[tokio::test]
    async fn test_run_stops_at_iteration_ceiling() {
        let llm = MockLlm::new().with_structured([
            pick("write"),
            proceed(),
            keep_going(),
            draft("# Proposal"),
            pick("analyze"),
            proceed(),
            keep_going(),
            pick("review"),
            proceed(),
            keep_going(),
        ]);
        let (use_case, llm, store, _) = use_case(llm, &AgentParams::default());

        let output = use_case.execute(input(false)).await.unwrap();

        assert_eq!(output.iterations, 3);
        assert_eq!(
            output.stop_reason,
            StopReason::Terminated(LOOP_CEILING_REASON.to_string())
        );
        let kinds: Vec<_> = output.records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::Write, ActionKind::Analyze, ActionKind::Review]
        );
        assert_eq!(store.records.lock().unwrap().len(), 3);
        // No model call once the ceiling is hit.
        assert_eq!(MockLlm::count(&llm.structured_calls), 10);
    }

    #[tokio::test]
    async fn test_last_iteration_forces_write_without_draft() {
        let llm = MockLlm::new().with_structured([
            pick("analyze"),
            proceed(),
            keep_going(),
            draft("# Proposal\nLease 40 vans."),
        ]);
        let params = AgentParams::default().with_max_iterations(2);
        let (use_case, llm, _, logger) = use_case(llm, &params);

        let output = use_case.execute(input(false)).await.unwrap();

        let kinds: Vec<_> = output.records.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ActionKind::Analyze, ActionKind::Write]);
        assert_eq!(output.content, "# Proposal\nLease 40 vans.");
        assert!(output.history.contains(FORCED_WRITE_REASON));
        assert_eq!(
            output.stop_reason,
            StopReason::Terminated(LOOP_CEILING_REASON.to_string())
        );
        // The forced iteration asks neither orchestrator, skipper nor terminator.
        assert_eq!(MockLlm::count(&llm.structured_calls), 4);
        assert_eq!(
            logger.types(),
            vec![
                "run_started",
                "goal_set",
                "action_selected",
                "action_completed",
                "write_forced",
                "action_completed",
                "run_terminated",
                "run_finished",
            ]
        );
    }

    #[tokio::test]
    async fn test_done_ends_run_without_execution() {
        let llm = MockLlm::new().with_structured([pick("done")]);
        let (use_case, llm, store, logger) = use_case(llm, &AgentParams::default());

        let output = use_case.execute(input(false)).await.unwrap();

        assert!(matches!(output.stop_reason, StopReason::Done(_)));
        assert_eq!(output.iterations, 0);
        assert!(output.records.is_empty());
        assert!(store.records.lock().unwrap().is_empty());
        assert_eq!(MockLlm::count(&llm.structured_calls), 1);
        assert_eq!(
            logger.types(),
            vec!["run_started", "goal_set", "action_selected", "run_finished"]
        );
    }

    #[tokio::test]
    async fn test_skipper_veto_runs_fallback() {
        let llm = MockLlm::new().with_structured([
            pick("analyze"),
            json!({ "shouldSkip": true, "reason": "nothing to analyze yet" }),
            keep_going(),
            draft("# Proposal"),
        ]);
        let params = AgentParams::default().with_max_iterations(2);
        let (use_case, _, _, logger) = use_case(llm, &params);

        let output = use_case.execute(input(false)).await.unwrap();

        // Empty action history: the first fallback candidate wins.
        assert_eq!(output.records[0].kind, ActionKind::Plan);
        assert!(output.history.contains("skipped analyze: nothing to analyze yet"));
        assert!(logger.types().contains(&"action_skipped"));
    }

    #[tokio::test]
    async fn test_vetoed_plan_never_runs_on_empty_history() {
        let llm = MockLlm::new().with_structured([
            pick("plan"),
            json!({ "shouldSkip": true, "reason": "the hearing already is a plan" }),
            keep_going(),
            draft("# Proposal"),
        ]);
        let params = AgentParams::default().with_max_iterations(2);
        let (use_case, _, _, _) = use_case(llm, &params);

        let output = use_case.execute(input(false)).await.unwrap();

        assert_ne!(output.records[0].kind, ActionKind::Plan);
        assert_eq!(output.records[0].kind, ActionKind::Search);
        assert!(output.history.contains("running search instead"));
    }

    #[tokio::test]
    async fn test_vetoed_search_variant_excludes_search_fallback() {
        let llm = MockLlm::new().with_structured([
            pick("plan"),
            proceed(),
            keep_going(),
            pick("externalSearch"),
            json!({ "shouldSkip": true, "reason": "the plan says to stop searching" }),
            keep_going(),
            draft("# Proposal"),
        ]);
        let (use_case, _, _, _) = use_case(llm, &AgentParams::default());

        let output = use_case.execute(input(false)).await.unwrap();

        // After one plan, search is the least used family but was just vetoed.
        let kinds: Vec<_> = output.records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![ActionKind::Plan, ActionKind::Analyze, ActionKind::Write]
        );
        assert!(output.history.contains("running analyze instead"));
    }

    #[tokio::test]
    async fn test_internal_search_disabled_is_vetoed_without_model_call() {
        let llm = MockLlm::new().with_structured([
            pick("internalSearch"),
            keep_going(),
            draft("# Proposal"),
        ]);
        let params = AgentParams::default().with_max_iterations(2);
        let (use_case, llm, _, _) = use_case(llm, &params);

        let output = use_case.execute(input(false)).await.unwrap();

        assert_eq!(output.records[0].kind, ActionKind::Plan);
        // Orchestrator and terminator, then the forced write; no skipper call.
        assert_eq!(MockLlm::count(&llm.structured_calls), 3);
    }

    #[tokio::test]
    async fn test_bookkeeping_kind_falls_back_without_skipper() {
        let llm = MockLlm::new().with_structured([
            pick("summarize"),
            keep_going(),
            draft("# Proposal"),
        ]);
        let params = AgentParams::default().with_max_iterations(2);
        let (use_case, llm, _, _) = use_case(llm, &params);

        let output = use_case.execute(input(false)).await.unwrap();

        assert_eq!(output.records[0].kind, ActionKind::Plan);
        assert!(output.history.contains("summarize cannot be executed"));
        assert_eq!(MockLlm::count(&llm.structured_calls), 3);
    }

    #[tokio::test]
    async fn test_terminator_stops_before_execution() {
        let llm = MockLlm::new().with_structured([
            pick("write"),
            proceed(),
            json!({ "shouldTerminate": true, "reason": "proposal is complete" }),
        ]);
        let (use_case, _, store, _) = use_case(llm, &AgentParams::default());

        let output = use_case
            .execute(input(false).with_initial_content("Existing draft"))
            .await
            .unwrap();

        assert_eq!(
            output.stop_reason,
            StopReason::Terminated("proposal is complete".to_string())
        );
        assert_eq!(output.content, "Existing draft");
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_updates_content() {
        let llm = MockLlm::new().with_structured([
            pick("write"),
            proceed(),
            keep_going(),
            draft("# Proposal\nElectrify 40 vans."),
            pick("done"),
        ]);
        let params = AgentParams::default().with_max_iterations(2);
        let (use_case, _, _, logger) = use_case(llm, &params);

        let output = use_case.execute(input(false)).await.unwrap();

        assert_eq!(output.content, "# Proposal\nElectrify 40 vans.");
        assert_eq!(output.records[0].kind, ActionKind::Write);
        assert!(output.history.contains("=== write ==="));
        // A draft exists, so the last iteration is left to the orchestrator.
        assert!(matches!(output.stop_reason, StopReason::Done(_)));
        assert_eq!(
            logger.types(),
            vec![
                "run_started",
                "goal_set",
                "action_selected",
                "action_completed",
                "action_selected",
                "run_finished",
            ]
        );
    }

    #[tokio::test]
    async fn test_goal_generated_when_missing() {
        let llm = MockLlm::new()
            .with_texts(["A board-ready rollout plan"])
            .with_structured([pick("done")]);
        let (use_case, llm, _, _) = use_case(llm, &AgentParams::default());
        let problem = Problem::new("p-2", "Solar roofs", "Cover the depot roofs").unwrap();

        let output = use_case.execute(RunProposalInput::new(problem)).await.unwrap();

        assert_eq!(output.goal, "A board-ready rollout plan");
        assert_eq!(llm.text_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_orchestrator_output_aborts() {
        let llm = MockLlm::new().with_structured([pick("celebrate")]);
        let (use_case, _, store, _) = use_case(llm, &AgentParams::default());

        let err = use_case.execute(input(false)).await.unwrap_err();

        assert!(matches!(
            err,
            AgentError::MalformedOutput {
                stage: "orchestrator",
                ..
            }
        ));
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_compacted_over_threshold() {
        let llm = MockLlm::new()
            .with_texts(["Plan output, see https://example.com/grants", "Short https://example.com/grants"])
            .with_structured([
                pick("plan"),
                proceed(),
                keep_going(),
                pick("done"),
            ]);
        let thresholds = SummarizeThresholds::default().with_model("test-summarizer", 10);
        let mut params = AgentParams::default()
            .with_max_iterations(3)
            .with_summarize_thresholds(thresholds);
        params.models.summarizer = proposal_domain::ModelSelector::gemini("test-summarizer");
        let (use_case, _, store, logger) = use_case(llm, &params);

        let output = use_case.execute(input(false)).await.unwrap();

        assert!(output.history.starts_with("Short https://example.com/grants"));
        assert!(logger.types().contains(&"history_compacted"));
        // Stored records are never rewritten by compaction.
        let stored = store.records.lock().unwrap();
        assert_eq!(
            stored[0].output(),
            "Plan output, see https://example.com/grants"
        );
    }

    #[tokio::test]
    async fn test_failed_compaction_is_not_retried_until_history_grows() {
        let notes = "Budget notes for the depot. ".repeat(15);
        let longer = notes.repeat(2);
        let llm = MockLlm::new()
            .with_texts([notes.as_str(), longer.as_str(), "ok"])
            .with_structured([
                pick("plan"),
                proceed(),
                keep_going(),
                pick("analyze"),
                proceed(),
                keep_going(),
                draft("# Proposal"),
            ]);
        let thresholds = SummarizeThresholds::default().with_model("test-summarizer", 10);
        let mut params = AgentParams::default()
            .with_max_iterations(3)
            .with_summarize_thresholds(thresholds);
        params.models.summarizer = proposal_domain::ModelSelector::gemini("test-summarizer");
        let (use_case, llm, _, logger) = use_case(llm, &params);

        let output = use_case.execute(input(false)).await.unwrap();

        assert_eq!(output.iterations, 3);
        assert!(output.history.contains(notes.trim()));
        assert!(!logger.types().contains(&"history_compacted"));
        // One token count and one rewrite before iteration 2; iteration 3 backs off.
        assert_eq!(MockLlm::count(&llm.token_calls), 1);
        assert_eq!(MockLlm::count(&llm.text_calls), 3);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let (use_case, llm, _, _) = use_case(MockLlm::new(), &AgentParams::default());
        let use_case = use_case.with_cancellation(token);

        let err = use_case.execute(input(false)).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(MockLlm::count(&llm.structured_calls), 0);
    }
}
