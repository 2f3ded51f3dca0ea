//! End-to-end voting rounds driven through the chamber with a controlled clock.

use camara_chamber::{Chamber, ChamberParams};
use camara_nullables::NullClock;
use camara_roster::{BoardSeat, Roster, Voter};
use camara_session::{Choice, NewProposal, ProposalStatus, SessionError};
use camara_types::{Actor, ProposalId, Role, Timestamp};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn roster(n: usize) -> Roster {
    Roster::from_voters((0..n).map(|i| Voter::new(format!("v{i}"), format!("user{i}"), format!("Member {i}"))))
}

fn setup(members: usize) -> (Chamber, Arc<NullClock>) {
    let clock = Arc::new(NullClock::new(0));
    let chamber = Chamber::new(roster(members), clock.clone(), ChamberParams::default());
    (chamber, clock)
}

fn secretariat() -> Actor {
    Actor::new("secretariat", Role::Secretariat)
}

fn manager() -> Actor {
    Actor::new("manager", Role::Manager)
}

fn member(i: usize) -> Actor {
    Actor::new(format!("v{i}"), Role::Member)
}

fn submit(chamber: &Chamber, title: &str, window_secs: u64) -> ProposalId {
    chamber
        .submit_proposal(
            &secretariat(),
            NewProposal {
                title: title.into(),
                window_secs: Some(window_secs),
                ..Default::default()
            },
        )
        .expect("submit")
        .id
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn duplicate_and_late_ballots_leave_tally_unchanged() {
    let (chamber, clock) = setup(5);
    let id = submit(&chamber, "Sixty second vote", 60);
    chamber.open_voting(&manager(), id).unwrap();

    clock.set(10);
    chamber.cast_vote(&member(0), id, Choice::Yes).unwrap();
    assert_eq!(chamber.tally_snapshot(id).unwrap().yes, 1);

    clock.set(20);
    let err = chamber.cast_vote(&member(0), id, Choice::No).unwrap_err();
    assert!(matches!(err, SessionError::DuplicateVote { .. }));

    clock.set(61);
    let err = chamber.cast_vote(&member(1), id, Choice::No).unwrap_err();
    assert_eq!(err, SessionError::WindowExpired(id));

    let snapshot = chamber.tally_snapshot(id).unwrap();
    assert_eq!(
        (snapshot.yes, snapshot.no, snapshot.abstain, snapshot.cast_count),
        (1, 0, 0, 1)
    );
    // Still open until the manager closes it, but the countdown is done.
    assert_eq!(snapshot.status, ProposalStatus::Open);
    assert_eq!(snapshot.remaining_seconds, 0);
}

#[test]
fn reopening_resets_the_tally() {
    let (chamber, clock) = setup(5);
    let id = submit(&chamber, "Re-vote", 60);
    chamber.open_voting(&manager(), id).unwrap();
    clock.set(5);
    for i in 0..3 {
        chamber.cast_vote(&member(i), id, Choice::Yes).unwrap();
    }
    assert_eq!(chamber.tally_snapshot(id).unwrap().cast_count, 3);

    clock.set(40);
    let reopened = chamber.open_voting(&manager(), id).unwrap();
    assert_eq!(reopened.window_opened_at, Some(Timestamp::new(40)));

    let snapshot = chamber.tally_snapshot(id).unwrap();
    assert_eq!(
        (snapshot.yes, snapshot.no, snapshot.abstain, snapshot.cast_count),
        (0, 0, 0, 0)
    );
    assert!(snapshot.ballots.is_empty());
    assert_eq!(snapshot.remaining_seconds, 60);

    // Members who voted in the discarded round may vote again.
    chamber.cast_vote(&member(0), id, Choice::No).unwrap();
}

#[test]
fn identities_off_the_roster_cannot_vote() {
    let (chamber, _) = setup(2);
    let id = submit(&chamber, "Roster check", 60);
    chamber.open_voting(&manager(), id).unwrap();

    let stranger = Actor::new("stranger", Role::Member);
    assert_eq!(
        chamber.cast_vote(&stranger, id, Choice::Yes).unwrap_err(),
        SessionError::VoterNotFound("stranger".into())
    );

    chamber.set_voter_active(&"v1".into(), false).unwrap();
    let err = chamber.cast_vote(&member(1), id, Choice::Yes).unwrap_err();
    assert_eq!(err, SessionError::VoterInactive("v1".into()));
    assert_eq!(err.kind(), "unauthorized");

    assert_eq!(chamber.tally_snapshot(id).unwrap().cast_count, 0);
}

#[test]
fn closing_twice_is_idempotent() {
    let (chamber, _) = setup(2);
    let id = submit(&chamber, "Double click", 60);
    chamber.open_voting(&manager(), id).unwrap();

    let first = chamber.close_voting(&manager(), id).unwrap();
    let second = chamber.close_voting(&manager(), id).unwrap();
    assert_eq!(first.status, ProposalStatus::Closed);
    assert_eq!(second, first);

    assert_eq!(
        chamber.cast_vote(&member(0), id, Choice::Yes).unwrap_err(),
        SessionError::VotingNotOpen(id)
    );
}

#[test]
fn roster_size_is_read_live() {
    let (chamber, _) = setup(3);
    let id = submit(&chamber, "Growing roster", 60);
    assert_eq!(chamber.tally_snapshot(id).unwrap().roster_size, 3);

    chamber.upsert_voter(Voter::new("late", "latecomer", "Late Member"));
    assert_eq!(chamber.tally_snapshot(id).unwrap().roster_size, 4);
    assert_eq!(chamber.roster_size(), 4);
}

#[test]
fn snapshot_names_voters_by_username() {
    let (chamber, clock) = setup(3);
    let id = submit(&chamber, "Names", 60);
    chamber.open_voting(&manager(), id).unwrap();
    clock.advance(1);
    chamber.cast_vote(&member(2), id, Choice::Abstain).unwrap();
    chamber.cast_vote(&member(0), id, Choice::Yes).unwrap();

    let snapshot = chamber.tally_snapshot(id).unwrap();
    let listed: Vec<_> = snapshot
        .ballots
        .iter()
        .map(|e| (e.voter.as_str(), e.choice.as_str()))
        .collect();
    assert_eq!(listed, [("user2", "Abstain"), ("user0", "Yes")]);
    assert_eq!(snapshot.remaining_seconds, 59);
}

#[test]
fn listings_follow_window_openings() {
    let (chamber, clock) = setup(2);
    let a = submit(&chamber, "A", 60);
    let b = submit(&chamber, "B", 60);
    let c = submit(&chamber, "C", 60);
    let d = submit(&chamber, "D", 60);

    assert!(chamber.current_display_proposal().is_none());
    assert!(chamber.list_open_proposal().is_none());
    let drafts: Vec<_> = chamber.list_draft_proposals().iter().map(|p| p.id).collect();
    assert_eq!(drafts, [a, b, c, d]);

    clock.set(100);
    chamber.open_voting(&manager(), b).unwrap();
    chamber.close_voting(&manager(), b).unwrap();
    clock.set(200);
    chamber.open_voting(&manager(), a).unwrap();
    chamber.close_voting(&manager(), a).unwrap();
    clock.set(300);
    chamber.open_voting(&manager(), c).unwrap();

    assert_eq!(chamber.list_open_proposal().map(|p| p.id), Some(c));
    assert_eq!(chamber.current_display_proposal().map(|p| p.id), Some(c));

    let closed: Vec<_> = chamber.list_recently_closed(None).iter().map(|p| p.id).collect();
    assert_eq!(closed, [a, b]);
    assert_eq!(chamber.list_recently_closed(Some(1)).len(), 1);

    chamber.close_voting(&manager(), c).unwrap();
    assert!(chamber.list_open_proposal().is_none());
    assert_eq!(chamber.current_display_proposal().map(|p| p.id), Some(c));
    assert_eq!(chamber.list_draft_proposals().len(), 1);
}

#[test]
fn casting_vote_holder_is_reported() {
    let clock = Arc::new(NullClock::new(0));
    let roster = Roster::from_voters([
        Voter::new("p", "president", "The President")
            .with_seat(BoardSeat::new("President", 0).unwrap()),
        Voter::new("m", "member", "A Member"),
    ]);
    let chamber = Chamber::new(roster, clock, ChamberParams::default());
    assert_eq!(
        chamber.casting_vote_holder().map(|v| v.username),
        Some("president".to_string())
    );
}

#[test]
fn concurrent_duplicate_casts_accept_exactly_one() {
    let (chamber, clock) = setup(8);
    let id = submit(&chamber, "Race", 60);
    chamber.open_voting(&manager(), id).unwrap();
    clock.set(1);

    let accepted: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|n| {
                let chamber = &chamber;
                scope.spawn(move || {
                    let choice = Choice::ALL[n % 3];
                    chamber.cast_vote(&member(n % 8), id, choice).is_ok() as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    let snapshot = chamber.tally_snapshot(id).unwrap();
    assert_eq!(accepted, 8);
    assert_eq!(snapshot.cast_count, 8);
    assert_eq!(snapshot.yes + snapshot.no + snapshot.abstain, snapshot.cast_count);
    assert!(snapshot.cast_count <= snapshot.roster_size);
}

#[test]
fn reopen_racing_with_casts_never_tears_a_snapshot() {
    let (chamber, clock) = setup(8);
    let id = submit(&chamber, "Reset race", 60);
    chamber.open_voting(&manager(), id).unwrap();
    clock.set(1);

    std::thread::scope(|scope| {
        let chamber = &chamber;
        scope.spawn(move || {
            for i in 0..8 {
                let _ = chamber.cast_vote(&member(i), id, Choice::Yes);
            }
        });
        scope.spawn(move || {
            for _ in 0..4 {
                chamber.open_voting(&manager(), id).unwrap();
            }
        });
        scope.spawn(move || {
            for _ in 0..50 {
                let s = chamber.tally_snapshot(id).unwrap();
                assert_eq!(s.yes + s.no + s.abstain, s.cast_count);
                assert_eq!(s.ballots.len() as u32, s.cast_count);
            }
        });
    });

    let snapshot = chamber.tally_snapshot(id).unwrap();
    assert!(snapshot.cast_count <= 8);
}

#[test]
fn open_listing_never_reports_a_closed_proposal() {
    let (chamber, _) = setup(2);
    let ids: Vec<_> = (0..4).map(|i| submit(&chamber, &format!("P{i}"), 60)).collect();

    std::thread::scope(|scope| {
        let chamber = &chamber;
        let ids = &ids;
        scope.spawn(move || {
            for _ in 0..25 {
                for &id in ids {
                    chamber.open_voting(&manager(), id).unwrap();
                    chamber.close_voting(&manager(), id).unwrap();
                }
            }
        });
        scope.spawn(move || {
            for _ in 0..200 {
                if let Some(p) = chamber.list_open_proposal() {
                    assert_eq!(p.status, ProposalStatus::Open);
                }
                let panel = chamber.member_panel(&member(0));
                if let Some(p) = panel.open {
                    assert_eq!(p.status, ProposalStatus::Open);
                }
            }
        });
    });

    assert!(chamber.list_open_proposal().is_none());
}
