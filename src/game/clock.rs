use crate::game::{GameState, Phase};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// AIの思考待ちが終わったことを知らせるチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    /// 予約したときの `GameState::version`
    pub version: u64,
}

/// AIの着手を一定時間遅らせるタイマー
///
/// 予約は常に1つだけ。チケットは予約時の version を持ち、受け取った側は
/// `accept` で現在の状態と照合してから `tick_opponent` を呼ぶ。
pub struct OpponentClock {
    delay: Duration,
    tx: mpsc::UnboundedSender<Ticket>,
    pending: Option<(u64, JoinHandle<()>)>,
}

impl OpponentClock {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Ticket>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            OpponentClock {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// `version` の状態に対してAIの着手を予約する (同じ version なら何もしない)
    pub fn schedule(&mut self, version: u64) {
        if matches!(self.pending, Some((v, _)) if v == version) {
            return;
        }
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // 受信側が先に閉じていれば捨てる
            let _ = tx.send(Ticket { version });
        });
        debug!(version, delay_ms = delay.as_millis() as u64, "opponent move scheduled");
        self.pending = Some((version, handle));
    }

    /// 予約を取り消す
    pub fn cancel(&mut self) {
        if let Some((version, handle)) = self.pending.take() {
            handle.abort();
            debug!(version, "opponent move cancelled");
        }
    }

    /// 状態に合わせて予約・取り消しを行う
    pub fn sync(&mut self, state: &GameState) {
        if state.phase() == Phase::AwaitingOpponent {
            self.schedule(state.version());
        } else {
            self.cancel();
        }
    }

    /// 届いたチケットが現在の状態に対するものか確認する
    pub fn accept(&mut self, ticket: Ticket, state: &GameState) -> bool {
        let current = matches!(self.pending, Some((v, _)) if v == ticket.version)
            && ticket.version == state.version()
            && state.phase() == Phase::AwaitingOpponent;
        if current {
            self.pending = None;
        } else {
            debug!(
                ticket = ticket.version,
                state = state.version(),
                "stale opponent ticket discarded"
            );
        }
        current
    }
}

impl Drop for OpponentClock {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, DEFAULT_SIZE};
    use crate::player::RandomAI;
    use tokio::time::{timeout, Instant};

    const DELAY: Duration = Duration::from_millis(1000);

    fn opponent_turn() -> GameState {
        GameState::new(DEFAULT_SIZE)
            .unwrap()
            .submit_human_move(Position::new(3, 4))
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticket_arrives_after_delay() {
        let (mut clock, mut rx) = OpponentClock::new(DELAY);
        let start = Instant::now();
        clock.schedule(3);
        assert!(clock.is_pending());

        let ticket = rx.recv().await.unwrap();
        assert_eq!(ticket, Ticket { version: 3 });
        assert!(start.elapsed() >= DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_ticket() {
        let (mut clock, mut rx) = OpponentClock::new(DELAY);
        clock.schedule(1);
        clock.cancel();
        assert!(!clock.is_pending());

        let res = timeout(DELAY * 5, rx.recv()).await;
        assert!(res.is_err(), "cancelled ticket was delivered");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_same_version_keeps_timer() {
        let (mut clock, mut rx) = OpponentClock::new(DELAY);
        let start = Instant::now();
        clock.schedule(2);
        tokio::time::sleep(DELAY / 2).await;
        clock.schedule(2);

        let ticket = rx.recv().await.unwrap();
        assert_eq!(ticket.version, 2);
        // 予約し直していなければ最初の予約から DELAY 後に届く
        assert!(start.elapsed() < DELAY + DELAY / 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_delay_discards_move() {
        let (mut clock, mut rx) = OpponentClock::new(DELAY);
        let state = opponent_turn();
        clock.sync(&state);
        assert!(clock.is_pending());

        tokio::time::sleep(DELAY / 2).await;
        let state = state.reset();
        clock.sync(&state);
        assert!(!clock.is_pending());

        let res = timeout(DELAY * 5, rx.recv()).await;
        assert!(res.is_err());
        assert_eq!(state.phase(), Phase::AwaitingHuman);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticket_is_rejected() {
        let (mut clock, mut rx) = OpponentClock::new(DELAY);
        let state = opponent_turn();
        clock.sync(&state);
        let ticket = rx.recv().await.unwrap();

        // チケットが届いた後でもリセット済みなら適用しない
        let reset = state.reset();
        assert!(!clock.accept(ticket, &reset));
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_ticket_drives_opponent() {
        let (mut clock, mut rx) = OpponentClock::new(DELAY);
        let state = opponent_turn();
        clock.sync(&state);

        let ticket = rx.recv().await.unwrap();
        assert!(clock.accept(ticket, &state));
        assert!(!clock.is_pending());

        let mut ai = RandomAI::seeded("AI", 11);
        let next = state.tick_opponent(&mut ai).unwrap();
        assert_eq!(next.phase(), Phase::AwaitingHuman);

        // 同じチケットは二度使えない
        assert!(!clock.accept(ticket, &state));
    }
}
