//! Deliberation council use case
//!
//! Runs one three-phase debate over the registered members. Each phase fans
//! out to every member on a [`JoinSet`] and is fully drained before the next
//! phase starts.
//!
//! Provider failures never abort a cycle: a member whose call fails is
//! recorded in the minutes and simply missing from that phase's output.
//! The only error is a missing quorum, checked before any provider call.

use crate::config::{CouncilParams, MIN_QUORUM};
use crate::ports::debate_observer::{DebateObserver, NoObserver};
use crate::ports::reasoning_provider::{Councilor, ProviderError, ReasoningProvider};
use conclave_domain::{
    Ballot, BoundedSet, CouncilVerdict, Critique, DebateState, DomainError, MinutesEntry,
    Position, PromptTemplate,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Actor name used for minutes written by the council itself
pub const COUNCIL_ACTOR: &str = "council";

#[derive(Error, Debug)]
pub enum CouncilError {
    #[error("Council quorum not met: {actual} member(s) registered, at least {required} required")]
    Quorum { required: usize, actual: usize },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CouncilError {
    pub fn is_quorum(&self) -> bool {
        matches!(self, CouncilError::Quorum { .. })
    }
}

/// A peer council of reasoning providers
pub struct DeliberationCouncil {
    members: BoundedSet<Councilor>,
    state: DebateState,
    params: CouncilParams,
    observer: Arc<dyn DebateObserver>,
}

impl Default for DeliberationCouncil {
    fn default() -> Self {
        Self::new(CouncilParams::default())
    }
}

impl DeliberationCouncil {
    pub fn new(params: CouncilParams) -> Self {
        Self {
            members: BoundedSet::new(),
            state: DebateState::Idle,
            params,
            observer: Arc::new(NoObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn DebateObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn state(&self) -> DebateState {
        self.state
    }

    pub fn cardinality(&self) -> usize {
        self.members.cardinality()
    }

    /// Names of the registered members, in set iteration order
    pub fn members(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name().to_string()).collect()
    }

    /// Add `provider` to the council.
    ///
    /// Returns `false` and leaves the council unchanged when this exact
    /// provider instance is already a member.
    pub fn register(&mut self, provider: Arc<dyn ReasoningProvider>) -> bool {
        let councilor = Councilor::new(provider);
        let name = councilor.name().to_string();

        if !self.members.add(councilor) {
            warn!("{} is already a council member; registration ignored", name);
            return false;
        }

        info!("{} joined the council", name);
        self.observer
            .on_minutes(&MinutesEntry::new(COUNCIL_ACTOR, format!("{} joined the council", name)));
        true
    }

    /// Run one full debate cycle on `topic`.
    pub async fn summon(&mut self, topic: &str) -> Result<CouncilVerdict, CouncilError> {
        let required = self.params.quorum().max(MIN_QUORUM);
        let actual = self.members.cardinality();
        if actual < required {
            return Err(CouncilError::Quorum { required, actual });
        }

        // Fixed roster for the whole cycle; indices key every phase's output.
        let roster: Vec<Councilor> = self.members.to_vec();
        let participants: Vec<String> = roster.iter().map(|m| m.name().to_string()).collect();

        self.state = DebateState::Idle;
        let mut minutes = Vec::new();
        self.record(
            &mut minutes,
            COUNCIL_ACTOR,
            format!(
                "Council convened on '{}' with {} members: {}",
                topic,
                roster.len(),
                participants.join(", ")
            ),
        );
        info!("Council convened with {} members", roster.len());

        let positions = self.phase_divergence(topic, &roster, &mut minutes).await?;
        let critiques = self
            .phase_deliberation(&roster, &positions, &mut minutes)
            .await?;

        let ordered_positions: Vec<Position> = positions.into_iter().flatten().collect();
        let context = PromptTemplate::aggregate_context(topic, &ordered_positions, &critiques);
        let ballots = self.phase_convergence(&context, &roster, &mut minutes).await?;

        self.state.advance(DebateState::Adjourned)?;
        self.observer.on_state_change(DebateState::Adjourned, 0);
        self.record(
            &mut minutes,
            COUNCIL_ACTOR,
            format!(
                "Council adjourned: {} position(s), {} critique(s), {} ballot(s)",
                ordered_positions.len(),
                critiques.len(),
                ballots.len()
            ),
        );

        Ok(CouncilVerdict {
            topic: topic.to_string(),
            participants,
            result: CouncilVerdict::render_result(&ballots),
            minutes,
            positions: ordered_positions,
            critiques,
            ballots,
        })
    }

    /// Phase 1: every member contemplates the topic independently
    async fn phase_divergence(
        &mut self,
        topic: &str,
        roster: &[Councilor],
        minutes: &mut Vec<MinutesEntry>,
    ) -> Result<Vec<Option<Position>>, CouncilError> {
        self.enter(DebateState::Divergence, roster.len(), minutes)?;

        let mut join_set = JoinSet::new();
        for (idx, member) in roster.iter().enumerate() {
            let provider = member.provider();
            let topic = topic.to_string();
            join_set.spawn(async move { (idx, provider.contemplate(&topic).await) });
        }

        let mut positions: Vec<Option<Position>> = vec![None; roster.len()];
        while let Some(joined) = join_set.join_next().await {
            if let Some((idx, content)) = self.settle(joined, roster, "contemplate", minutes) {
                let name = roster[idx].name();
                self.record(minutes, name, "Submitted a position");
                positions[idx] = Some(Position::new(name, content));
            }
        }

        Ok(positions)
    }

    /// Phase 2: every member critiques every other member's position
    async fn phase_deliberation(
        &mut self,
        roster: &[Councilor],
        positions: &[Option<Position>],
        minutes: &mut Vec<MinutesEntry>,
    ) -> Result<Vec<Critique>, CouncilError> {
        let pairs: Vec<(usize, usize)> = (0..roster.len())
            .flat_map(move |critic| {
                positions
                    .iter()
                    .enumerate()
                    .filter(move |(author, position)| *author != critic && position.is_some())
                    .map(move |(author, _)| (critic, author))
            })
            .collect();

        self.enter(DebateState::Deliberation, pairs.len(), minutes)?;

        let mut join_set = JoinSet::new();
        for (slot, &(critic, author)) in pairs.iter().enumerate() {
            let Some(position) = &positions[author] else {
                continue;
            };
            let provider = roster[critic].provider();
            let content = position.content.clone();
            let author_name = position.author.clone();
            join_set.spawn(async move { (slot, provider.critique(&content, &author_name).await) });
        }

        let mut collected: Vec<Option<Critique>> = vec![None; pairs.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, Ok(content))) => {
                    let (critic, author) = pairs[slot];
                    let critic_name = roster[critic].name();
                    let author_name = roster[author].name();
                    self.observer
                        .on_member_complete(DebateState::Deliberation, critic_name, true);
                    self.record(minutes, critic_name, format!("Critiqued {}", author_name));
                    collected[slot] = Some(Critique::new(critic_name, author_name, content));
                }
                Ok((slot, Err(e))) => {
                    let (critic, author) = pairs[slot];
                    let critic_name = roster[critic].name();
                    warn!("{} failed to critique {}: {}", critic_name, roster[author].name(), e);
                    self.observer
                        .on_member_complete(DebateState::Deliberation, critic_name, false);
                    self.record(
                        minutes,
                        critic_name,
                        format!("Failed to critique {}: {}", roster[author].name(), e),
                    );
                }
                Err(e) => self.record_join_error(e, "critique", minutes),
            }
        }

        // Pairs are generated critic-major, so this groups critiques by critic.
        Ok(collected.into_iter().flatten().collect())
    }

    /// Phase 3: every member votes over the aggregate context
    async fn phase_convergence(
        &mut self,
        context: &str,
        roster: &[Councilor],
        minutes: &mut Vec<MinutesEntry>,
    ) -> Result<Vec<Ballot>, CouncilError> {
        self.enter(DebateState::Convergence, roster.len(), minutes)?;

        let mut join_set = JoinSet::new();
        for (idx, member) in roster.iter().enumerate() {
            let provider = member.provider();
            let context = context.to_string();
            join_set.spawn(async move { (idx, provider.vote(&context).await) });
        }

        let mut ballots: Vec<Option<Ballot>> = vec![None; roster.len()];
        while let Some(joined) = join_set.join_next().await {
            if let Some((idx, content)) = self.settle(joined, roster, "vote", minutes) {
                let name = roster[idx].name();
                self.record(minutes, name, "Cast a vote");
                ballots[idx] = Some(Ballot::new(name, content));
            }
        }

        Ok(ballots.into_iter().flatten().collect())
    }

    fn enter(
        &mut self,
        state: DebateState,
        tasks: usize,
        minutes: &mut Vec<MinutesEntry>,
    ) -> Result<(), DomainError> {
        self.state.advance(state)?;
        info!("Phase: {} ({} tasks)", state, tasks);
        self.observer.on_state_change(state, tasks);
        self.record(minutes, COUNCIL_ACTOR, format!("Phase: {}", state));
        Ok(())
    }

    /// Unpack one per-member task result, recording failures in the minutes.
    fn settle(
        &self,
        joined: Result<(usize, Result<String, ProviderError>), tokio::task::JoinError>,
        roster: &[Councilor],
        action: &str,
        minutes: &mut Vec<MinutesEntry>,
    ) -> Option<(usize, String)> {
        match joined {
            Ok((idx, Ok(content))) => {
                debug!("{} completed {}", roster[idx].name(), action);
                self.observer
                    .on_member_complete(self.state, roster[idx].name(), true);
                Some((idx, content))
            }
            Ok((idx, Err(e))) => {
                let name = roster[idx].name();
                warn!("{} failed to {}: {}", name, action, e);
                self.observer.on_member_complete(self.state, name, false);
                self.record(minutes, name, format!("Failed to {}: {}", action, e));
                None
            }
            Err(e) => {
                self.record_join_error(e, action, minutes);
                None
            }
        }
    }

    fn record_join_error(
        &self,
        error: tokio::task::JoinError,
        action: &str,
        minutes: &mut Vec<MinutesEntry>,
    ) {
        warn!("Task join error during {}: {}", action, error);
        self.record(
            minutes,
            COUNCIL_ACTOR,
            format!("A {} task aborted: {}", action, error),
        );
    }

    fn record(&self, minutes: &mut Vec<MinutesEntry>, actor: &str, message: impl Into<String>) {
        let entry = MinutesEntry::new(actor, message);
        self.observer.on_minutes(&entry);
        minutes.push(entry);
    }
}
