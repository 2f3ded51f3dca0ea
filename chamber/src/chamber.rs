//! Chamber service.

use crate::panel::MemberPanel;
use crate::params::ChamberParams;
use camara_roster::{Roster, Voter};
use camara_session::{
    Ballot, Choice, NewProposal, Proposal, ProposalStatus, Session, SessionError, TallySnapshot,
};
use camara_types::{Actor, Clock, ProposalId, Role, Timestamp, VoterId};
use camara_utils::{format_duration, StatsCounter};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

pub const STAT_SUBMITTED: &str = "proposals_submitted";
pub const STAT_OPENED: &str = "windows_opened";
pub const STAT_CLOSED: &str = "windows_closed";
pub const STAT_ACCEPTED: &str = "ballots_accepted";
pub const STAT_REJECTED: &str = "ballots_rejected";

type SessionHandle = Arc<Mutex<Session>>;

/// Entry point for every voting operation.
pub struct Chamber {
    roster: RwLock<Roster>,
    sessions: RwLock<BTreeMap<ProposalId, SessionHandle>>,
    next_id: Mutex<ProposalId>,
    clock: Arc<dyn Clock>,
    params: ChamberParams,
    stats: StatsCounter,
}

impl Chamber {
    pub fn new(roster: Roster, clock: Arc<dyn Clock>, params: ChamberParams) -> Self {
        info!(
            members = roster.size(),
            in_office = roster.active_count(),
            default_window = %format_duration(params.default_window_secs),
            "chamber ready"
        );
        Self {
            roster: RwLock::new(roster),
            sessions: RwLock::new(BTreeMap::new()),
            next_id: Mutex::new(ProposalId::FIRST),
            clock,
            params,
            stats: StatsCounter::new(&[
                STAT_SUBMITTED,
                STAT_OPENED,
                STAT_CLOSED,
                STAT_ACCEPTED,
                STAT_REJECTED,
            ]),
        }
    }

    // ── Secretariat ──────────────────────────────────────────────────────

    /// Put a new proposal on the agenda in `drafting` status.
    pub fn submit_proposal(
        &self,
        actor: &Actor,
        new: NewProposal,
    ) -> Result<Proposal, SessionError> {
        authorize(actor, Role::Secretariat)?;

        // The id counter stays locked until the proposal is stored, so ids
        // appear in the map in submission order.
        let mut next_id = lock(&self.next_id);
        let proposal = new.into_proposal(*next_id, self.params.default_window_secs)?;
        write(&self.sessions).insert(
            proposal.id,
            Arc::new(Mutex::new(Session::new(proposal.clone()))),
        );
        *next_id = next_id.next();
        drop(next_id);

        self.stats.increment(STAT_SUBMITTED);
        info!(
            proposal = %proposal.id,
            title = %proposal.title,
            classification = proposal.classification.label(),
            "proposal submitted"
        );
        Ok(proposal)
    }

    // ── Manager ──────────────────────────────────────────────────────────

    /// Open the voting window on a proposal, discarding any earlier ballots.
    ///
    /// Reopening an open proposal restarts its window: this is a re-vote,
    /// not an error.
    pub fn open_voting(&self, actor: &Actor, id: ProposalId) -> Result<Proposal, SessionError> {
        authorize(actor, Role::Manager)?;
        let handle = self.session(id)?;
        let mut session = lock(&handle);
        let discarded = session.open_voting(self.clock.now());
        self.stats.increment(STAT_OPENED);
        if discarded > 0 {
            info!(proposal = %id, discarded, by = %actor.id, "re-vote called");
        }
        Ok(session.proposal().clone())
    }

    /// Close the voting window. Repeated or late closes succeed silently.
    pub fn close_voting(&self, actor: &Actor, id: ProposalId) -> Result<Proposal, SessionError> {
        authorize(actor, Role::Manager)?;
        let handle = self.session(id)?;
        let mut session = lock(&handle);
        if session.close_voting() {
            self.stats.increment(STAT_CLOSED);
        }
        Ok(session.proposal().clone())
    }

    // ── Members ──────────────────────────────────────────────────────────

    /// Cast the actor's ballot on a proposal.
    ///
    /// The actor must be an in-office roster member; any role may vote.
    pub fn cast_vote(
        &self,
        actor: &Actor,
        id: ProposalId,
        choice: Choice,
    ) -> Result<Ballot, SessionError> {
        let result = self.try_cast(actor, id, choice);
        match &result {
            Ok(_) => self.stats.increment(STAT_ACCEPTED),
            Err(e) => {
                self.stats.increment(STAT_REJECTED);
                warn!(proposal = %id, voter = %actor.id, reason = e.kind(), "ballot rejected");
            }
        }
        result
    }

    fn try_cast(&self, actor: &Actor, id: ProposalId, choice: Choice) -> Result<Ballot, SessionError> {
        read(&self.roster).eligible(&actor.id)?;
        let handle = self.session(id)?;
        let mut session = lock(&handle);
        let ballot = session.cast_vote(&actor.id, choice, self.clock.now())?;
        Ok(ballot.clone())
    }

    /// The member's panel: the open proposal, their ballot on it, the agenda.
    pub fn member_panel(&self, actor: &Actor) -> MemberPanel {
        let (open, accepting_votes, own_ballot) = self
            .with_open_session(|session| {
                let proposal = session.proposal();
                (
                    Some(proposal.clone()),
                    proposal.is_accepting_votes(self.clock.now()),
                    session.ballots().get(&actor.id).cloned(),
                )
            })
            .unwrap_or((None, false, None));
        MemberPanel {
            open,
            accepting_votes,
            own_ballot,
            agenda: self.list_draft_proposals(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn proposal(&self, id: ProposalId) -> Result<Proposal, SessionError> {
        let handle = self.session(id)?;
        let session = lock(&handle);
        Ok(session.proposal().clone())
    }

    /// Proposals on the agenda, oldest first.
    pub fn list_draft_proposals(&self) -> Vec<Proposal> {
        let mut drafts = self.proposals_with_status(ProposalStatus::Drafting);
        drafts.sort_by_key(|p| p.id);
        drafts
    }

    /// The open proposal most recently opened, if any.
    pub fn list_open_proposal(&self) -> Option<Proposal> {
        self.with_open_session(|session| session.proposal().clone())
    }

    /// Closed proposals, most recently opened first. `None` uses the
    /// configured default limit.
    pub fn list_recently_closed(&self, limit: Option<usize>) -> Vec<Proposal> {
        let mut closed = self.proposals_with_status(ProposalStatus::Closed);
        sort_latest_first(&mut closed);
        closed.truncate(limit.unwrap_or(self.params.recently_closed_limit));
        closed
    }

    /// What the public screen shows: the open or closed proposal with the
    /// latest window opening.
    pub fn current_display_proposal(&self) -> Option<Proposal> {
        let mut shown: Vec<Proposal> = self
            .all_proposals()
            .into_iter()
            .filter(|p| p.status != ProposalStatus::Drafting)
            .collect();
        sort_latest_first(&mut shown);
        shown.into_iter().next()
    }

    /// Live tally for the public display.
    ///
    /// Proposal, ballots and roster are read under the session lock, so the
    /// snapshot is never torn across a reopening.
    pub fn tally_snapshot(&self, id: ProposalId) -> Result<TallySnapshot, SessionError> {
        let handle = self.session(id)?;
        let session = lock(&handle);
        let roster = read(&self.roster);
        Ok(session.snapshot(roster.size(), self.clock.now(), |voter| {
            roster.display_name(voter)
        }))
    }

    // ── Roster ───────────────────────────────────────────────────────────

    /// Current roster size. Always live; never cached.
    pub fn roster_size(&self) -> u32 {
        read(&self.roster).size()
    }

    pub fn upsert_voter(&self, voter: Voter) {
        write(&self.roster).upsert(voter);
    }

    pub fn set_voter_active(&self, id: &VoterId, active: bool) -> Result<(), SessionError> {
        Ok(write(&self.roster).set_active(id, active)?)
    }

    pub fn casting_vote_holder(&self) -> Option<Voter> {
        read(&self.roster).casting_vote_holder().cloned()
    }

    pub fn stats(&self) -> HashMap<&'static str, u64> {
        self.stats.snapshot()
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn session(&self, id: ProposalId) -> Result<SessionHandle, SessionError> {
        read(&self.sessions)
            .get(&id)
            .cloned()
            .ok_or(SessionError::ProposalNotFound(id))
    }

    fn handles(&self) -> Vec<SessionHandle> {
        read(&self.sessions).values().cloned().collect()
    }

    fn all_proposals(&self) -> Vec<Proposal> {
        self.handles()
            .iter()
            .map(|handle| lock(handle).proposal().clone())
            .collect()
    }

    fn proposals_with_status(&self, status: ProposalStatus) -> Vec<Proposal> {
        self.all_proposals()
            .into_iter()
            .filter(|p| p.status == status)
            .collect()
    }

    /// Run `f` under the lock of the most recently opened session.
    fn with_open_session<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        loop {
            let handle = self.latest_open_handle()?;
            let session = lock(&handle);
            // Closed between the scan and this lock: scan again.
            if session.proposal().status == ProposalStatus::Open {
                return Some(f(&session));
            }
        }
    }

    fn latest_open_handle(&self) -> Option<SessionHandle> {
        let mut latest: Option<(Proposal, SessionHandle)> = None;
        for handle in self.handles() {
            let proposal = lock(&handle).proposal().clone();
            if proposal.status != ProposalStatus::Open {
                continue;
            }
            let newer = latest
                .as_ref()
                .map_or(true, |(best, _)| opening_key(&proposal) > opening_key(best));
            if newer {
                latest = Some((proposal, handle));
            }
        }
        latest.map(|(_, handle)| handle)
    }
}

fn authorize(actor: &Actor, required: Role) -> Result<(), SessionError> {
    if actor.has_role(required) {
        Ok(())
    } else {
        warn!(actor = %actor.id, role = %actor.role, required = %required, "unauthorized");
        Err(SessionError::Unauthorized(required))
    }
}

/// Ordering key: window opening, then id to break ties.
fn opening_key(p: &Proposal) -> (Option<Timestamp>, ProposalId) {
    (p.window_opened_at, p.id)
}

fn sort_latest_first(proposals: &mut [Proposal]) {
    proposals.sort_by(|a, b| opening_key(b).cmp(&opening_key(a)));
}

// Every critical section leaves its data consistent before anything that
// could panic, so a poisoned lock still guards valid state.

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(l: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    l.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(l: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    l.write().unwrap_or_else(PoisonError::into_inner)
}
