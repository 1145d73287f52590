/*
 * Responsibility
 * - user 更新で使う HTTP method の fallback chain (状態機械)
 *   POST item → PUT item → PATCH item → POST collection
 * - 遷移規則だけを持つ純粋なモジュール。実際の送信は repos 側のループ
 *
 * 遷移規則
 * - 2xx: その結果を採用して終了
 * - 404 / 405: 次の状態へ (最後なら Exhausted)
 * - それ以外: 即終了 (401 含む)
 */
use reqwest::{Method, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStep {
    PostToItem,
    PutToItem,
    PatchToItem,
    PostToCollection,
}

impl UpdateStep {
    pub const FIRST: Self = Self::PostToItem;

    pub fn method(self) -> Method {
        match self {
            Self::PostToItem | Self::PostToCollection => Method::POST,
            Self::PutToItem => Method::PUT,
            Self::PatchToItem => Method::PATCH,
        }
    }

    pub fn targets_collection(self) -> bool {
        matches!(self, Self::PostToCollection)
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::PostToItem => Some(Self::PutToItem),
            Self::PutToItem => Some(Self::PatchToItem),
            Self::PatchToItem => Some(Self::PostToCollection),
            Self::PostToCollection => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Accept,
    Advance(UpdateStep),
    Exhausted,
    Abort,
}

pub fn is_probe_miss(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::METHOD_NOT_ALLOWED
}

pub fn transition(step: UpdateStep, status: StatusCode) -> Transition {
    if status.is_success() {
        return Transition::Accept;
    }
    if !is_probe_miss(status) {
        return Transition::Abort;
    }
    match step.next() {
        Some(next) => Transition::Advance(next),
        None => Transition::Exhausted,
    }
}
