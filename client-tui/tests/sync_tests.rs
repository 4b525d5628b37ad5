//! Session synchronisation driven through a mock transport.

use chess::{Piece, PieceColor, PieceKind, Position, Square, UciMove};
use chess_client::{
    ClientError, ClientMessage, ErrorPayload, InitialPayload, MockCall, MockTransport,
    MovePayload, ServerMessage,
};
use client_tui::prelude::*;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";

fn initial(player: PieceColor, fen: &str, moves: &[&str]) -> ServerMessage {
    ServerMessage::Initial(InitialPayload {
        player,
        fen: fen.to_string(),
        moves: moves.iter().map(|m| m.to_string()).collect(),
    })
}

fn moved(fen: &str, moves: &[&str], last: &str) -> ServerMessage {
    ServerMessage::Move(MovePayload {
        fen: fen.to_string(),
        moves: moves.iter().map(|m| m.to_string()).collect(),
        last_move: last.to_string(),
    })
}

fn synced(player: PieceColor) -> (SyncController<MockTransport>, MockTransport, BoardSurface) {
    let transport = MockTransport::new();
    let mut sync = SyncController::new(transport.clone(), "game-1");
    let mut surface = BoardSurface::default();
    sync.apply(initial(player, START_FEN, &["e2e4", "g1f3"]), &mut surface);
    (sync, transport, surface)
}

#[tokio::test]
async fn test_submit_sends_one_move_message() {
    let (mut sync, transport, _surface) = synced(PieceColor::White);

    sync.submit_move(UciMove::new(Square::E2, Square::E4))
        .await
        .unwrap();

    assert_eq!(
        transport.sent_messages(),
        vec![ClientMessage::Move {
            data: "e2e4".to_string(),
            player: PieceColor::White,
        }]
    );
}

#[tokio::test]
async fn test_submit_out_of_turn_sends_nothing() {
    let (mut sync, transport, _surface) = synced(PieceColor::Black);

    let result = sync.submit_move(UciMove::new(Square::E7, Square::E5)).await;

    assert!(matches!(result, Err(SyncError::OutOfTurn)));
    assert!(transport.sent_messages().is_empty());
}

#[tokio::test]
async fn test_failed_send_is_reported() {
    let transport = MockTransport::new().with_failing_sends();
    let mut sync = SyncController::new(transport, "game-1");
    let mut surface = BoardSurface::default();
    sync.apply(initial(PieceColor::White, START_FEN, &["e2e4"]), &mut surface);

    let result = sync.submit_move(UciMove::new(Square::E2, Square::E4)).await;

    assert!(matches!(result, Err(SyncError::Transport(_))));
    assert_eq!(sync.session().pending_move(), None);
}

#[test]
fn test_remote_move_redraws_from_position() {
    let (mut sync, _transport, mut surface) = synced(PieceColor::Black);

    let event = sync.apply(moved(AFTER_E4, &["e7e5", "d7d5"], "e2e4"), &mut surface);

    assert_eq!(
        event,
        SyncEvent::MoveApplied(UciMove::new(Square::E2, Square::E4))
    );
    let expected = Position::parse(AFTER_E4).unwrap();
    assert_eq!(&surface.grid(), expected.grid());
    assert_eq!(
        surface.highlighted(HighlightKind::LastMove),
        [Square::E2, Square::E4]
    );
    assert!(sync.session().is_local_turn());
    assert_eq!(sync.session().legal_moves().len(), 2);
}

#[test]
fn test_malformed_position_keeps_state() {
    let (mut sync, _transport, mut surface) = synced(PieceColor::White);
    let before = surface.grid();

    let event = sync.apply(
        moved("rnbqkbnr/pppppppp/8/8 b KQkq - 0 1", &["e7e5"], "e2e4"),
        &mut surface,
    );

    assert!(matches!(event, SyncEvent::Rejected(_)));
    assert_eq!(surface.grid(), before);
    assert_eq!(sync.session().side_to_move(), Some(PieceColor::White));
    assert_eq!(sync.phase(), SyncPhase::Synced);
    assert!(sync.status_message().is_some());
}

#[test]
fn test_empty_move_list_ends_game_against_side_to_move() {
    let (mut sync, _transport, mut surface) = synced(PieceColor::White);
    // Fool's mate: white to move, checkmated.
    let mated = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

    let event = sync.apply(moved(mated, &[], "d8h4"), &mut surface);

    assert_eq!(
        event,
        SyncEvent::GameOver {
            loser: PieceColor::White
        }
    );
    let SyncPhase::Terminated(reason) = sync.phase() else {
        panic!("expected termination, got {:?}", sync.phase());
    };
    assert_eq!(
        reason,
        TerminationReason::GameOver {
            loser: PieceColor::White
        }
    );
    assert_eq!(reason.winner(), Some(PieceColor::Black));
}

#[test]
fn test_promotion_only_position_is_not_game_over() {
    let (mut sync, _transport, mut surface) = synced(PieceColor::Black);

    let event = sync.apply(
        moved(
            "8/4P3/8/8/8/8/8/k6K w - - 0 1",
            &["e7e8q", "e7e8r", "e7e8b", "e7e8n"],
            "a2a1",
        ),
        &mut surface,
    );

    assert!(matches!(event, SyncEvent::MoveApplied(_)));
    assert_eq!(sync.phase(), SyncPhase::Synced);
    assert_eq!(sync.session().legal_moves().unsupported().len(), 4);
}

#[tokio::test]
async fn test_server_error_reverts_pending_move() {
    let (mut sync, _transport, mut surface) = synced(PieceColor::White);
    let before = surface.grid();
    let mv = UciMove::new(Square::E2, Square::E4);

    surface.apply_move(mv);
    sync.submit_move(mv).await.unwrap();
    let event = sync.apply(
        ServerMessage::Error(ErrorPayload::Text("invalid move".to_string())),
        &mut surface,
    );

    assert_eq!(event, SyncEvent::ServerError("invalid move".to_string()));
    assert_eq!(surface.grid(), before);
    assert!(surface.highlighted(HighlightKind::LastMove).is_empty());
    assert_eq!(sync.session().pending_move(), None);
    assert!(sync.session().is_local_turn());
}

#[tokio::test]
async fn test_stream_end_terminates_session() {
    let transport = MockTransport::new()
        .with_message(initial(PieceColor::White, START_FEN, &["e2e4"]))
        .with_error(ClientError::ConnectionClosed);
    let mut sync = SyncController::new(transport, "game-1");
    let mut surface = BoardSurface::default();

    let first = sync.recv().await.unwrap().unwrap();
    sync.apply(first, &mut surface);
    assert!(sync.recv().await.unwrap().is_err());
    assert!(sync.recv().await.is_none());
    sync.connection_closed();

    assert_eq!(
        sync.phase(),
        SyncPhase::Terminated(TerminationReason::ConnectionClosed)
    );
    assert_eq!(
        surface.occupant(Square::E1),
        Some(Piece::new(PieceKind::King, PieceColor::White))
    );
}

#[tokio::test]
async fn test_close_reaches_transport_once() {
    let transport =
        MockTransport::new().with_message(initial(PieceColor::White, START_FEN, &["e2e4"]));
    let mut sync = SyncController::new(transport.clone(), "game-1");

    assert!(matches!(sync.recv().await, Some(Ok(ServerMessage::Initial(_)))));
    sync.close().await;
    sync.close().await;

    assert_eq!(transport.get_calls(), vec![MockCall::Recv, MockCall::Close]);
}
