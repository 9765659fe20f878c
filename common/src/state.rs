//! 表示状態と世代管理
//!
//! 送信ごとにチケットを発行し、最新チケットの完了だけを描画する。
//! 先に送った問い合わせが後から返っても表示を上書きしない。

use crate::error::{Error, FailureReport};
use crate::render::{render_error, render_results, WORKING_PLACEHOLDER};
use crate::types::InferenceResponse;

/// 結果領域の状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenderState {
    #[default]
    Idle,
    Working,
    Success(Vec<String>),
    Error(FailureReport),
}

impl RenderState {
    /// 問い合わせ結果から状態を作る
    pub fn from_outcome(outcome: Result<InferenceResponse, Error>) -> Self {
        match outcome {
            Ok(response) => RenderState::Success(response.results),
            Err(e) => RenderState::Error(e.failure_report()),
        }
    }

    /// 結果領域のマークアップ
    pub fn to_html(&self) -> String {
        match self {
            RenderState::Idle => String::new(),
            RenderState::Working => WORKING_PLACEHOLDER.to_string(),
            RenderState::Success(results) => render_results(results),
            RenderState::Error(report) => render_error(report),
        }
    }

    pub fn is_working(&self) -> bool {
        matches!(self, RenderState::Working)
    }
}

/// 送信1回分のチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// 世代カウンタ
#[derive(Debug, Clone, Default)]
pub struct QueryTracker {
    latest: u64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい送信を開始
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// チケットが最新か
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// 完了を受け付けるなら状態を返す。古いチケットは `None`
    pub fn complete(
        &self,
        ticket: RequestTicket,
        outcome: Result<InferenceResponse, Error>,
    ) -> Option<RenderState> {
        self.is_current(ticket).then(|| RenderState::from_outcome(outcome))
    }
}
