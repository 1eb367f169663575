//! Action builders, inspection and batch validation.

use anyhow::{bail, Context, Result};
use ax_01_action_codec::{
    is_valid_json, Action, GrantPowerOfAttorney, JoinNetwork, ProtocolCode, RevokePowerOfAttorney,
    UpdateInfo, Void,
};
use ax_02_membership_state::{CommittedState, HashVault, Verdict};
use serde_json::{json, Value};
use shared_crypto::{PrivateKey, Signature, Token};
use tracing::info;

/// Private key from a 32-byte hex seed.
pub fn parse_seed(seed: &str) -> Result<PrivateKey> {
    let bytes = hex::decode(seed.trim()).context("seed is not valid hex")?;
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .with_context(|| format!("seed must be 32 bytes, got {}", bytes.len()))?;
    Ok(PrivateKey::from_seed(seed))
}

pub fn parse_token(token: &str) -> Result<Token> {
    token
        .trim()
        .parse()
        .with_context(|| format!("invalid token '{token}'"))
}

pub fn parse_protocol(code: &str) -> Result<ProtocolCode> {
    let bytes = hex::decode(code.trim()).context("protocol code is not valid hex")?;
    let code: [u8; 4] = bytes
        .as_slice()
        .try_into()
        .context("protocol code must be 4 bytes")?;
    let code = ProtocolCode(code);
    if !code.is_axe_family() {
        bail!("protocol code {} is outside the axé family", hex::encode(code.0));
    }
    Ok(code)
}

fn require_json(details: &str) -> Result<()> {
    if !is_valid_json(details) {
        bail!("details must be a valid JSON document");
    }
    Ok(())
}

/// New or seeded key pair as `{seed, token}`.
pub fn keygen(seed: Option<&str>) -> Result<Value> {
    let key = match seed {
        Some(seed) => parse_seed(seed)?,
        None => PrivateKey::generate(),
    };
    Ok(json!({
        "seed": hex::encode(key.to_seed()),
        "token": key.token().to_hex(),
    }))
}

pub fn build_join(key: &PrivateKey, epoch: u64, handle: &str, details: &str) -> Result<Vec<u8>> {
    require_json(details)?;
    let mut action = JoinNetwork {
        epoch,
        author: key.token(),
        handle: handle.to_string(),
        details: details.to_string(),
        signature: Signature::EMPTY,
    };
    action.sign(key);
    Ok(action.to_bytes())
}

/// `signer` signs for `author`, which defaults to the signer itself.
pub fn build_update(
    signer: &PrivateKey,
    author: Option<Token>,
    epoch: u64,
    details: &str,
) -> Result<Vec<u8>> {
    require_json(details)?;
    let mut action = UpdateInfo {
        epoch,
        author: author.unwrap_or_else(|| signer.token()),
        details: details.to_string(),
        signer: signer.token(),
        signature: Signature::EMPTY,
    };
    action.sign(signer);
    Ok(action.to_bytes())
}

pub fn build_grant(
    key: &PrivateKey,
    attorney: Token,
    fingerprint: Option<&str>,
    epoch: u64,
) -> Result<Vec<u8>> {
    let fingerprint = match fingerprint {
        Some(fp) => hex::decode(fp.trim()).context("fingerprint is not valid hex")?,
        None => Vec::new(),
    };
    let mut action = GrantPowerOfAttorney {
        epoch,
        author: key.token(),
        fingerprint,
        attorney,
        signature: Signature::EMPTY,
    };
    action.sign(key);
    Ok(action.to_bytes())
}

pub fn build_revoke(key: &PrivateKey, attorney: Token, epoch: u64) -> Result<Vec<u8>> {
    let mut action = RevokePowerOfAttorney {
        epoch,
        author: key.token(),
        attorney,
        signature: Signature::EMPTY,
    };
    action.sign(key);
    Ok(action.to_bytes())
}

pub fn build_void(
    signer: &PrivateKey,
    author: Option<Token>,
    protocol: ProtocolCode,
    epoch: u64,
    data: &[u8],
) -> Result<Vec<u8>> {
    let mut action = Void {
        epoch,
        protocol,
        author: author.unwrap_or_else(|| signer.token()),
        data: data.to_vec(),
        signer: signer.token(),
        signature: Signature::EMPTY,
    };
    action.sign(signer);
    Ok(action.to_bytes())
}

/// Decode `bytes` and describe the action.
pub fn inspect(bytes: &[u8]) -> Result<Value> {
    let action = Action::decode(bytes).context("not a valid attorney action")?;
    let tokens: Vec<String> = action.tokens().iter().map(Token::to_hex).collect();
    Ok(json!({
        "kind": action.kind().to_string(),
        "size": bytes.len(),
        "tokens": tokens,
        "action": serde_json::to_value(&action)?,
    }))
}

/// Validate `batch` in order over one overlay at `epoch`. With `commit`,
/// the resulting mutation set is incorporated.
pub fn validate_batch<V: HashVault>(
    state: &CommittedState<V>,
    epoch: u64,
    batch: &[Vec<u8>],
    commit: bool,
) -> Result<Value> {
    let mut overlay = state.validator(epoch);
    let mut verdicts = Vec::with_capacity(batch.len());

    for (index, bytes) in batch.iter().enumerate() {
        let verdict = overlay
            .validate(bytes)
            .with_context(|| format!("validation aborted at action {index}"))?;
        verdicts.push(match verdict {
            Verdict::Accepted(kind) => json!({
                "index": index,
                "accepted": true,
                "kind": kind.to_string(),
            }),
            Verdict::Rejected(reason) => json!({
                "index": index,
                "accepted": false,
                "reason": reason.to_string(),
            }),
        });
    }

    let mutations = overlay.into_mutations();
    let committed = if commit {
        let summary = state
            .incorporate(&mutations)
            .context("failed to incorporate mutation set")?;
        info!(epoch, facts = mutations.len(), "batch committed");
        Some(json!({
            "grants_added": summary.grants_added,
            "grants_revoked": summary.grants_revoked,
            "members_added": summary.members_added,
            "captions_added": summary.captions_added,
        }))
    } else {
        None
    };

    Ok(json!({
        "epoch": epoch,
        "verdicts": verdicts,
        "mutations": serde_json::to_value(&mutations)?,
        "committed": committed,
    }))
}
