//! Room aggregate: membership, whiteboard state and fan-out for one room id.
//!
//! Two independent exclusion scopes live here:
//!
//! - `members`: the set of connected peers (`Mutex`)
//! - `whiteboard`: background color and history (`RwLock`)
//!
//! They are always taken in that order, after the registry lock when the
//! registry is involved. Fan-out only enqueues into each peer's bounded
//! outbound queue, so no network I/O ever happens while a lock is held.

use std::{collections::HashMap, fmt, sync::Arc};

use tokio::sync::{Mutex, RwLock};

use super::{
    entity::{CommandKind, WhiteboardSnapshot, WhiteboardState},
    error::RoomError,
    event::WhiteboardEvent,
    message_pusher::MessagePusher,
    value_object::{Color, ConnectionId, RawMessage, RoomId, Timestamp},
};

/// A peer's membership token: its id plus the queue that reaches it.
#[derive(Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    pusher: Arc<dyn MessagePusher>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { id, pusher }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Result of one fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Number of peers the message was enqueued for.
    pub delivered: usize,
    /// Peers removed from the room because their queue was full or closed.
    pub evicted: Vec<ConnectionId>,
}

/// Read-only summary used by the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOverview {
    pub id: RoomId,
    pub created_at: Timestamp,
    pub member_count: usize,
    pub background_color: Color,
    pub history: Vec<CommandKind>,
}

pub struct Room {
    id: RoomId,
    created_at: Timestamp,
    members: Mutex<HashMap<ConnectionId, Arc<dyn MessagePusher>>>,
    whiteboard: RwLock<WhiteboardState>,
}

impl Room {
    /// Create an empty room with a default whiteboard.
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            members: Mutex::new(HashMap::new()),
            whiteboard: RwLock::new(WhiteboardState::new()),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Add `handle` to the room and return the state it should start from.
    ///
    /// The snapshot is read while the membership lock is held, and every
    /// mutation happens under that same lock, so the new member sees each
    /// event exactly once: either in the snapshot or as a later broadcast.
    pub async fn join(&self, handle: ConnectionHandle) -> WhiteboardSnapshot {
        let mut members = self.members.lock().await;
        let whiteboard = self.whiteboard.read().await;
        members.insert(handle.id, handle.pusher);
        tracing::info!(
            "Connection '{}' joined room '{}' ({} members)",
            handle.id,
            self.id,
            members.len()
        );
        whiteboard.snapshot()
    }

    /// Remove a member. Returns `false` if it was not a member (idempotent).
    pub async fn leave(&self, connection_id: &ConnectionId) -> bool {
        let mut members = self.members.lock().await;
        let removed = members.remove(connection_id).is_some();
        if removed {
            tracing::info!(
                "Connection '{}' left room '{}' ({} members)",
                connection_id,
                self.id,
                members.len()
            );
        }
        removed
    }

    /// Deliver `message` to every member except `sender`, evicting members
    /// whose queue rejects it.
    ///
    /// Relays without recording. Client events go through [`Room::apply`],
    /// which records and relays as one step.
    pub async fn broadcast(
        &self,
        sender: &ConnectionId,
        message: &RawMessage,
    ) -> BroadcastReport {
        let mut members = self.members.lock().await;
        fan_out(&self.id, &mut members, sender, message)
    }

    /// Record `event` in the whiteboard and relay its raw bytes to the other
    /// members, as one step relative to other events and joins of this room.
    ///
    /// # Errors
    ///
    /// `RoomError::NotAMember` if `sender` is not (or no longer) a member; the
    /// event is then neither recorded nor relayed.
    pub async fn apply(
        &self,
        sender: &ConnectionId,
        event: &WhiteboardEvent,
    ) -> Result<BroadcastReport, RoomError> {
        let mut members = self.members.lock().await;
        if !members.contains_key(sender) {
            return Err(RoomError::NotAMember(
                sender.to_string(),
                self.id.to_string(),
            ));
        }

        {
            let mut whiteboard = self.whiteboard.write().await;
            event.apply_to(&mut whiteboard);
        }

        Ok(fan_out(&self.id, &mut members, sender, event.raw()))
    }

    pub async fn snapshot(&self) -> WhiteboardSnapshot {
        self.whiteboard.read().await.snapshot()
    }

    pub async fn member_count(&self) -> usize {
        self.members.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.lock().await.is_empty()
    }

    pub async fn overview(&self) -> RoomOverview {
        let member_count = self.members.lock().await.len();
        let whiteboard = self.whiteboard.read().await;
        RoomOverview {
            id: self.id.clone(),
            created_at: self.created_at,
            member_count,
            background_color: whiteboard.background_color().clone(),
            history: whiteboard
                .history()
                .iter()
                .map(|command| command.kind.clone())
                .collect(),
        }
    }
}

fn fan_out(
    room_id: &RoomId,
    members: &mut HashMap<ConnectionId, Arc<dyn MessagePusher>>,
    sender: &ConnectionId,
    message: &RawMessage,
) -> BroadcastReport {
    let mut report = BroadcastReport::default();

    for (id, pusher) in members.iter() {
        if id == sender {
            continue;
        }
        match pusher.push(message.clone()) {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                tracing::warn!(
                    "Evicting connection '{}' from room '{}': {}",
                    id,
                    room_id,
                    e
                );
                report.evicted.push(*id);
            }
        }
    }

    for id in &report.evicted {
        members.remove(id);
    }

    report
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;
    use crate::domain::{
        entity::DrawingCommand, error::MessagePushError, message_pusher::MockMessagePusher,
    };

    /// Pusher that records everything it is given.
    #[derive(Default)]
    struct RecordingPusher {
        received: StdMutex<Vec<RawMessage>>,
    }

    impl RecordingPusher {
        fn received(&self) -> Vec<RawMessage> {
            self.received.lock().unwrap().clone()
        }
    }

    impl MessagePusher for RecordingPusher {
        fn push(&self, message: RawMessage) -> Result<(), MessagePushError> {
            self.received.lock().unwrap().push(message);
            Ok(())
        }
    }

    fn create_test_room() -> Room {
        Room::new(RoomId::new("room-1".to_string()).unwrap(), Timestamp::new(1000))
    }

    async fn join_recording(room: &Room) -> (ConnectionId, Arc<RecordingPusher>) {
        let id = ConnectionId::generate();
        let pusher = Arc::new(RecordingPusher::default());
        room.join(ConnectionHandle::new(id, pusher.clone())).await;
        (id, pusher)
    }

    fn draw(n: usize) -> WhiteboardEvent {
        WhiteboardEvent::Draw(RawMessage::from(format!(
            r#"{{"type":"draw","prevX":{n},"prevY":0,"currX":1,"currY":1,"color":"red","brushSize":2}}"#
        )))
    }

    #[tokio::test]
    async fn test_join_returns_current_snapshot() {
        // テスト項目: 参加時に現在の背景色と履歴のスナップショットが返される
        // given (前提条件):
        let room = create_test_room();
        let (alice, _) = join_recording(&room).await;
        room.apply(&alice, &draw(0)).await.unwrap();

        // when (操作):
        let bob = ConnectionHandle::new(
            ConnectionId::generate(),
            Arc::new(RecordingPusher::default()),
        );
        let snapshot = room.join(bob).await;

        // then (期待する結果):
        assert_eq!(snapshot.background_color.as_str(), "#ffffff");
        assert_eq!(
            snapshot.commands,
            vec![DrawingCommand::new(CommandKind::Draw, draw(0).raw().clone())]
        );
        assert_eq!(room.member_count().await, 2);
    }

    #[tokio::test]
    async fn test_leave_is_idempotent() {
        // テスト項目: 同じ接続の leave を 2 回呼んでも問題ない
        // given (前提条件):
        let room = create_test_room();
        let (alice, _) = join_recording(&room).await;

        // when (操作):
        let first = room.leave(&alice).await;
        let second = room.leave(&alice).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(room.is_empty().await);
    }

    #[tokio::test]
    async fn test_broadcast_skips_sender() {
        // テスト項目: ブロードキャストは送信者以外の全員に届き、送信者には届かない
        // given (前提条件):
        let room = create_test_room();
        let alice = ConnectionId::generate();
        let mut alice_pusher = MockMessagePusher::new();
        alice_pusher.expect_push().never();
        room.join(ConnectionHandle::new(alice, Arc::new(alice_pusher)))
            .await;
        let (_bob, bob_pusher) = join_recording(&room).await;
        let (_charlie, charlie_pusher) = join_recording(&room).await;
        let message = RawMessage::from(r#"{"type":"draw"}"#);

        // when (操作):
        let report = room.broadcast(&alice, &message).await;

        // then (期待する結果):
        assert_eq!(report.delivered, 2);
        assert!(report.evicted.is_empty());
        assert_eq!(bob_pusher.received(), vec![message.clone()]);
        assert_eq!(charlie_pusher.received(), vec![message]);
    }

    #[tokio::test]
    async fn test_broadcast_evicts_failing_members() {
        // テスト項目: 送信に失敗したメンバーはその場でルームから退去させられる
        // given (前提条件):
        let room = create_test_room();
        let (alice, _) = join_recording(&room).await;
        let (_bob, bob_pusher) = join_recording(&room).await;

        let slow = ConnectionId::generate();
        let mut slow_pusher = MockMessagePusher::new();
        slow_pusher
            .expect_push()
            .times(1)
            .returning(|_| Err(MessagePushError::QueueFull));
        room.join(ConnectionHandle::new(slow, Arc::new(slow_pusher)))
            .await;

        let gone = ConnectionId::generate();
        let mut gone_pusher = MockMessagePusher::new();
        gone_pusher
            .expect_push()
            .times(1)
            .returning(|_| Err(MessagePushError::Disconnected));
        room.join(ConnectionHandle::new(gone, Arc::new(gone_pusher)))
            .await;

        // when (操作):
        let first = room.broadcast(&alice, &RawMessage::from("1")).await;
        let second = room.broadcast(&alice, &RawMessage::from("2")).await;

        // then (期待する結果): 退去後は二度と送信されない（times(1) で検証）
        assert_eq!(first.delivered, 1);
        assert_eq!(first.evicted.len(), 2);
        assert!(first.evicted.contains(&slow));
        assert!(first.evicted.contains(&gone));
        assert_eq!(second.delivered, 1);
        assert!(second.evicted.is_empty());
        assert_eq!(room.member_count().await, 2);
        assert_eq!(
            bob_pusher.received(),
            vec![RawMessage::from("1"), RawMessage::from("2")]
        );
    }

    #[tokio::test]
    async fn test_apply_records_and_relays() {
        // テスト項目: apply でイベントが履歴に記録され、他のメンバーに中継される
        // given (前提条件):
        let room = create_test_room();
        let (alice, alice_pusher) = join_recording(&room).await;
        let (_bob, bob_pusher) = join_recording(&room).await;
        let event = WhiteboardEvent::Background {
            raw: RawMessage::from(r##"{"type":"background","color":"#000000"}"##),
            color: Some(Color::new("#000000")),
        };

        // when (操作):
        let report = room.apply(&alice, &event).await.unwrap();

        // then (期待する結果):
        assert_eq!(report.delivered, 1);
        assert_eq!(bob_pusher.received(), vec![event.raw().clone()]);
        assert!(alice_pusher.received().is_empty());
        let snapshot = room.snapshot().await;
        assert_eq!(snapshot.commands.len(), 1);
        assert_eq!(snapshot.background_color.as_str(), "#000000");
    }

    #[tokio::test]
    async fn test_apply_from_non_member_is_rejected() {
        // テスト項目: メンバーでない接続からのイベントは記録も中継もされない
        // given (前提条件):
        let room = create_test_room();
        let (_bob, bob_pusher) = join_recording(&room).await;
        let stranger = ConnectionId::generate();

        // when (操作):
        let result = room.apply(&stranger, &draw(0)).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RoomError::NotAMember(_, _))));
        assert!(room.snapshot().await.commands.is_empty());
        assert!(bob_pusher.received().is_empty());
    }

    #[tokio::test]
    async fn test_overview_reports_counts_and_kinds() {
        // テスト項目: overview がメンバー数・背景色・履歴の種別を返す
        // given (前提条件):
        let room = create_test_room();
        let (alice, _) = join_recording(&room).await;
        room.apply(&alice, &draw(0)).await.unwrap();
        room.apply(&alice, &WhiteboardEvent::Text(RawMessage::from(r#"{"type":"text"}"#)))
            .await
            .unwrap();

        // when (操作):
        let overview = room.overview().await;

        // then (期待する結果):
        assert_eq!(overview.id.as_str(), "room-1");
        assert_eq!(overview.created_at, Timestamp::new(1000));
        assert_eq!(overview.member_count, 1);
        assert_eq!(overview.history, vec![CommandKind::Draw, CommandKind::Text]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_join_during_concurrent_events_sees_each_event_once() {
        // テスト項目: イベント送信中に参加した接続は、各イベントをスナップショットか
        //             ブロードキャストのどちらか一方で、順序どおり 1 回だけ受け取る
        // given (前提条件):
        let room = Arc::new(create_test_room());
        let (alice, _) = join_recording(&room).await;
        let total = 200;

        // when (操作):
        let writer = {
            let room = room.clone();
            tokio::spawn(async move {
                for n in 0..total {
                    room.apply(&alice, &draw(n)).await.unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };
        tokio::task::yield_now().await;
        let late = Arc::new(RecordingPusher::default());
        let snapshot = room
            .join(ConnectionHandle::new(ConnectionId::generate(), late.clone()))
            .await;
        writer.await.unwrap();

        // then (期待する結果):
        let mut seen: Vec<RawMessage> = snapshot
            .commands
            .into_iter()
            .map(|command| command.payload)
            .collect();
        seen.extend(late.received());
        let expected: Vec<RawMessage> = (0..total).map(|n| draw(n).raw().clone()).collect();
        assert_eq!(seen, expected);
    }
}
