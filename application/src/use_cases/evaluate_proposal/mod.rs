//! Evaluate proposal use case.
//!
//! Runs the proposal loop several times on the same input, each run against
//! a fresh action store, and scores every finished run with [`RunJudge`].
//! A failed run or judgment is kept in the report; cancellation aborts.

mod types;

pub use types::{EvaluationReport, EvaluationRun};

use crate::config::AgentParams;
use crate::error::AgentError;
use crate::ports::action_store::ActionStore;
use crate::ports::llm_client::LlmClient;
use crate::ports::run_event_logger::{NoRunEventLogger, RunEventLogger};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::services::judge::RunJudge;
use crate::services::shared::{check_cancelled, run_cancellable};
use crate::use_cases::run_proposal::{RunProposalInput, RunProposalOutput, RunProposalUseCase};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Use case for repeated, judged proposal runs
pub struct EvaluateProposalUseCase<L, T, S>
where
    L: LlmClient + 'static,
    T: ToolExecutorPort + 'static,
    S: ActionStore + Default + 'static,
{
    llm: Arc<L>,
    tools: Arc<T>,
    params: AgentParams,
    judge: RunJudge<L>,
    event_logger: Arc<dyn RunEventLogger>,
    cancellation_token: Option<CancellationToken>,
    _store: PhantomData<fn() -> S>,
}

impl<L, T, S> EvaluateProposalUseCase<L, T, S>
where
    L: LlmClient + 'static,
    T: ToolExecutorPort + 'static,
    S: ActionStore + Default + 'static,
{
    /// The judge uses the decision model unless replaced with [`Self::with_judge`].
    pub fn new(llm: Arc<L>, tools: Arc<T>, params: AgentParams) -> Self {
        let judge = RunJudge::new(llm.clone(), params.models.decision.clone());
        Self {
            llm,
            tools,
            params,
            judge,
            event_logger: Arc::new(NoRunEventLogger),
            cancellation_token: None,
            _store: PhantomData,
        }
    }

    pub fn with_judge(mut self, judge: RunJudge<L>) -> Self {
        self.judge = judge;
        self
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn RunEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    fn run_use_case(&self) -> Result<RunProposalUseCase<L, S>, AgentError> {
        let use_case = RunProposalUseCase::new(
            self.llm.clone(),
            self.tools.clone(),
            Arc::new(S::default()),
            &self.params,
        )?
        .with_event_logger(self.event_logger.clone());
        Ok(match &self.cancellation_token {
            Some(token) => use_case.with_cancellation(token.clone()),
            None => use_case,
        })
    }

    /// Runs and judges `input` `runs` times (at least once).
    pub async fn execute(
        &self,
        input: RunProposalInput,
        runs: usize,
    ) -> Result<EvaluationReport, AgentError> {
        let runs = runs.max(1);
        let problem_id = input.problem.id.to_string();
        let mut results = Vec::with_capacity(runs);

        for run in 1..=runs {
            check_cancelled(&self.cancellation_token)?;
            info!("Evaluation run {}/{} for {}", run, runs, problem_id);

            let started = Instant::now();
            let outcome = self.run_use_case()?.execute(input.clone()).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            let output = match outcome {
                Ok(output) => output,
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    warn!("Evaluation run {} failed: {}", run, e);
                    results.push(EvaluationRun::failed(run, duration_ms, e.to_string()));
                    continue;
                }
            };

            results.push(self.judge_run(run, duration_ms, &input, output).await?);
        }

        let report = EvaluationReport::new(problem_id, self.judge.rounds(), results);
        info!(
            "Evaluation finished: {} runs, {} failed, mean overall {:?}",
            report.runs.len(),
            report.failed_runs(),
            report.mean_overall
        );
        Ok(report)
    }

    async fn judge_run(
        &self,
        run: usize,
        duration_ms: u64,
        input: &RunProposalInput,
        output: RunProposalOutput,
    ) -> Result<EvaluationRun, AgentError> {
        let verdict = run_cancellable(
            &self.cancellation_token,
            self.judge
                .judge(&input.problem, &output.goal, &output.records, &output.content),
        )
        .await;

        let (judgment, error) = match verdict {
            Ok(judgment) => (Some(judgment), None),
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                warn!("Judging run {} failed: {}", run, e);
                (None, Some(e.to_string()))
            }
        };

        Ok(EvaluationRun {
            run,
            duration_ms,
            iterations: output.iterations,
            stop_reason: output.stop_reason.as_str().to_string(),
            action_count: output.records.len(),
            content: output.content,
            judgment,
            error,
        })
    }
}
