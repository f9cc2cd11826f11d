//! Reaction service
//!
//! Applies toggle/replace reactions to posts and keeps the post's engagement
//! signals in step.

use feed_core::{ReactionKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::{ReactRequest, ReactionChangeResponse, ReactionSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::parse_id;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply `kind` for the actor: same kind again clears it, another kind replaces it
    #[instrument(
        skip(self, request),
        fields(actor_id = %request.actor_id, kind = %request.kind)
    )]
    pub fn react(
        &self,
        post_id: Snowflake,
        request: ReactRequest,
    ) -> ServiceResult<ReactionChangeResponse> {
        let actor_id = parse_id("actorId", &request.actor_id)?;
        let kind: ReactionKind = request.kind.parse()?;

        let ledger = self.ctx.ledger();
        let (change, tally, sentiment) = self.ctx.posts().with_post(post_id, |_| {
            let change = ledger.apply(post_id, actor_id, kind);
            self.ctx.aggregator().record_reaction(post_id, &change);
            (change, ledger.tally_of(post_id), ledger.sentiment_of(post_id))
        })?;

        info!(
            post_id = %post_id,
            actor_id = %actor_id,
            previous = ?change.previous,
            applied = ?change.applied,
            "Reaction applied"
        );

        Ok(ReactionChangeResponse {
            post_id: post_id.to_string(),
            actor_id: actor_id.to_string(),
            previous: change.previous,
            current: change.applied,
            tally,
            sentiment,
        })
    }

    /// Tally and sentiment of a post, with `actor_id`'s own reaction when given
    #[instrument(skip(self))]
    pub fn summary(
        &self,
        post_id: Snowflake,
        actor_id: Option<Snowflake>,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let ledger = self.ctx.ledger();
        let (tally, sentiment, me) = self.ctx.posts().with_post(post_id, |_| {
            let me = actor_id
                .and_then(|actor| ledger.reaction_of(post_id, actor))
                .map(|reaction| reaction.kind);
            (ledger.tally_of(post_id), ledger.sentiment_of(post_id), me)
        })?;

        Ok(ReactionSummaryResponse {
            post_id: post_id.to_string(),
            total: tally.total(),
            sentiment,
            tally,
            me,
        })
    }
}
