//! Renewal time selection inside the suggested window.
//!
//! Every client picks its own instant uniformly at random within the window
//! so that a fleet does not hit the CA at the same moment. Since this engine
//! cannot schedule a wake-up, a renewal is triggered as soon as the next
//! periodic check would already be too late for the selected instant.

use ari_client::AriClient;
use ari_core::{CertificateIdentifier, RenewalReason, RenewalWindow, Result, Verdict};
use chrono::{DateTime, Duration, Utc};
use rand::{CryptoRng, Rng, RngCore};
use tracing::{debug, info, warn};

/// Pick a renewal instant in `[start, end)` with whole-second granularity.
///
/// Windows shorter than one second select `start`.
pub fn select_renewal_time<R>(window: &RenewalWindow, rng: &mut R) -> DateTime<Utc>
where
    R: RngCore + CryptoRng,
{
    let span = window.duration().num_seconds();
    if span <= 0 {
        return window.start();
    }
    window.start() + Duration::seconds(rng.gen_range(0..span))
}

/// Decide on a renewal given an already selected instant.
///
/// A window reaching past `not_after` means the CA response cannot be
/// trusted; the certificate is renewed regardless of `selected`.
pub fn decide(
    window: &RenewalWindow,
    selected: DateTime<Utc>,
    now: DateTime<Utc>,
    not_after: DateTime<Utc>,
    period: Duration,
    explanation_url: Option<String>,
) -> Verdict {
    if window.end() > not_after {
        warn!(
            window_end = %window.end(),
            not_after = %not_after,
            "ARI window ends after certificate expiry"
        );
        return Verdict::Renew(RenewalReason::AriFault);
    }

    // A next check beyond the representable range never comes.
    let Some(next_check) = now.checked_add_signed(period) else {
        info!(selected = %selected, "no next check within range, renewing now");
        return Verdict::Renew(RenewalReason::WindowReached { explanation_url });
    };

    if selected < next_check {
        info!(
            selected = %selected,
            next_check = %next_check,
            "renewal time falls before next check"
        );
        Verdict::Renew(RenewalReason::WindowReached { explanation_url })
    } else {
        debug!(selected = %selected, next_check = %next_check, "renewal time not reached");
        Verdict::Continue
    }
}

/// Query ARI for `identifier` and decide whether to renew now.
///
/// A 404 from the renewal-info endpoint means the CA does not know the
/// certificate and yields [`RenewalReason::AriNotFound`]. Every other failure,
/// including a 404 on the directory itself, is returned as an error.
pub async fn evaluate<R>(
    client: &AriClient,
    identifier: &CertificateIdentifier,
    directory_url: &str,
    now: DateTime<Utc>,
    not_after: DateTime<Utc>,
    period: Duration,
    rng: &mut R,
) -> Result<Verdict>
where
    R: RngCore + CryptoRng,
{
    let base = client.directory().renewal_info_url(directory_url).await?;

    let info = match client.renewal_info().get(&base, identifier).await {
        Ok(info) => info,
        Err(e) if e.is_not_found() => {
            info!(identifier = %identifier, "certificate unknown to ARI");
            return Ok(Verdict::Renew(RenewalReason::AriNotFound));
        }
        Err(e) => return Err(e),
    };

    if let Some(url) = &info.explanation_url {
        info!(explanation_url = %url, "CA attached an explanation to the renewal window");
    }

    let window = info.window()?;
    let selected = select_renewal_time(&window, rng);
    info!(
        start = %window.start(),
        end = %window.end(),
        selected = %selected,
        "suggested renewal window"
    );

    Ok(decide(&window, selected, now, not_after, period, info.explanation_url))
}
