use chrono_tz::Tz;

use crate::error::AppError;

fn first_valid<'a, I>(candidates: I) -> Option<Tz>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .find_map(|s| s.parse::<Tz>().ok())
}

/// Walk the candidate chain in priority order (booking snapshot, hold
/// snapshot, supplied location, looked-up location, professional profile,
/// caller fallback) and return the first string that parses as an IANA
/// zone. Invalid or empty entries are skipped, never trusted. Falls back
/// to UTC when the whole chain is empty.
pub fn resolve_zone<'a, I>(candidates: I) -> Tz
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    first_valid(candidates).unwrap_or(chrono_tz::UTC)
}

/// Like [`resolve_zone`] but refuses to guess: contexts where a wrong
/// zone would corrupt financial or temporal data (discount evaluation)
/// must get an explicit error instead of a silent UTC fallback.
pub fn resolve_zone_strict<'a, I>(candidates: I) -> Result<Tz, AppError>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    first_valid(candidates)
        .ok_or_else(|| AppError::Validation("no valid IANA time zone among candidates".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_valid_candidate() {
        let tz = resolve_zone([
            Some("Not/AZone"),
            None,
            Some("Europe/Berlin"),
            Some("America/New_York"),
        ]);
        assert_eq!(tz, chrono_tz::Europe::Berlin);
    }

    #[test]
    fn empty_strings_are_skipped() {
        let tz = resolve_zone([Some(""), Some("   "), Some("Asia/Tokyo")]);
        assert_eq!(tz, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn falls_back_to_utc() {
        let tz = resolve_zone([Some("garbage"), None]);
        assert_eq!(tz, chrono_tz::UTC);
    }

    #[test]
    fn strict_mode_refuses_to_guess() {
        assert!(resolve_zone_strict([Some("garbage"), None]).is_err());
        assert_eq!(
            resolve_zone_strict([None, Some("America/Los_Angeles")]).unwrap(),
            chrono_tz::America::Los_Angeles
        );
    }
}
