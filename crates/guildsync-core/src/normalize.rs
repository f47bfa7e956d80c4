//! Reshaping of backend server records into [`ServerConfig`].
//!
//! The backend exposes bans, ranks and e-mail domains as flat relational
//! lists. The bot wants them bucketed for lookup. Each pass consumes its
//! source list by value, so a record cannot be normalized twice.

use crate::error::{Result, SyncError};
use crate::types::{
    Bans, RankKind, Ranks, RawBan, RawEmailDomain, RawRank, RawServer, ServerConfig, Snowflake,
};

/// Route every ban value into the bucket named by its kind.
#[must_use]
pub fn normalize_bans(ban_set: Vec<RawBan>) -> Bans {
    ban_set.into_iter().fold(Bans::default(), |mut bans, ban| {
        bans.bucket_mut(ban.kind).push(ban.value);
        bans
    })
}

/// Group classic ranks under their label; confirmed and banned ranks go to
/// their flat lists.
///
/// A classic rank without a label cannot be keyed and is rejected.
pub fn normalize_ranks(rank_set: Vec<RawRank>) -> Result<Ranks> {
    let mut ranks = Ranks::default();

    for rank in rank_set {
        match rank.kind {
            RankKind::Classic => {
                let name = rank.name.ok_or_else(|| {
                    SyncError::Contract(format!("classic rank {} has no name", rank.discord_id))
                })?;
                ranks.classic.entry(name).or_default().push(rank.discord_id);
            }
            RankKind::Confirmed => ranks.confirmed.push(rank.discord_id),
            RankKind::Banned => ranks.banned.push(rank.discord_id),
        }
    }

    Ok(ranks)
}

/// Flatten domain records into their domain strings, keeping order.
#[must_use]
pub fn normalize_domains(emails_domains: Vec<RawEmailDomain>) -> Vec<String> {
    emails_domains.into_iter().map(|d| d.domain).collect()
}

/// Normalize a server record whose id travels inside the payload.
///
/// The id is split off and returned next to the config.
pub fn normalize_server(mut raw: RawServer) -> Result<(Snowflake, ServerConfig)> {
    let id = raw
        .id
        .take()
        .ok_or_else(|| SyncError::Contract("server record without id".into()))?;

    Ok((id, normalize_record(raw)?))
}

/// Normalize a server record, ignoring any id it carries.
///
/// Used when the id is already known from the request path.
pub fn normalize_record(raw: RawServer) -> Result<ServerConfig> {
    let RawServer {
        id: _,
        name,
        icon_url,
        rank_set,
        ban_set,
        emails_domains,
        extra,
    } = raw;

    Ok(ServerConfig {
        name,
        icon_url,
        ranks: normalize_ranks(rank_set)?,
        bans: normalize_bans(ban_set),
        domains: normalize_domains(emails_domains),
        extra,
    })
}
