//! テスト用の Connection / InboundSource 実装

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;

use crate::domain::{Connection, Frame, Inbound, InboundSource, SendError};

/// 受信したフレームを記録する Connection
///
/// `close()` を呼ぶと以降の送信は失敗する。
#[derive(Default)]
pub(crate) struct RecordingConnection {
    frames: Mutex<Vec<Frame>>,
    closed: AtomicBool,
}

impl RecordingConnection {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub(crate) fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    /// 受信したテキストフレームのみを返す
    pub(crate) fn texts(&self) -> Vec<String> {
        self.frames()
            .into_iter()
            .filter_map(|frame| frame.as_text().map(str::to_string))
            .collect()
    }

    pub(crate) fn take_texts(&self) -> Vec<String> {
        let texts = self.texts();
        self.frames.lock().unwrap().clear();
        texts
    }
}

impl Connection for RecordingConnection {
    fn send(&self, frame: Frame) -> Result<(), SendError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SendError::Closed);
        }
        self.frames.lock().unwrap().push(frame);
        Ok(())
    }
}

/// 事前に用意した入力を順に返す InboundSource
///
/// 入力を使い切ると `Inbound::Closed` を返す。
pub(crate) struct ScriptedSource {
    script: VecDeque<Inbound>,
}

impl ScriptedSource {
    pub(crate) fn new(script: impl IntoIterator<Item = Inbound>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

#[async_trait]
impl InboundSource for ScriptedSource {
    async fn receive(&mut self) -> Inbound {
        self.script.pop_front().unwrap_or(Inbound::Closed)
    }
}
