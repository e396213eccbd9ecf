//! Which seasons of a series a viewer may report against.
//!
//! Eligibility is the OR of two predicates: the regular copy has files, or
//! the 4K copy has files and the viewer may see 4K at all.

use crate::types::{AvailabilityStatus, Permission, PermissionSet, SeasonAvailability};

/// Permissions that unlock 4K series seasons (any one suffices).
pub const FOUR_K_SERIES_PERMISSIONS: [Permission; 2] =
    [Permission::Request4k, Permission::Request4kTv];

/// Status predicate shared by the regular and 4K copies.
pub fn status_reportable(status: AvailabilityStatus) -> bool {
    status.has_files()
}

/// Viewer predicate: 4K series reporting is switched on and the viewer holds
/// a 4K request permission.
pub fn can_report_4k(perms: PermissionSet, series_4k_enabled: bool) -> bool {
    series_4k_enabled && perms.has_any(&FOUR_K_SERIES_PERMISSIONS)
}

pub fn is_eligible(season: &SeasonAvailability, can_report_4k: bool) -> bool {
    status_reportable(season.status) || (can_report_4k && status_reportable(season.status_4k))
}

/// Eligible seasons in input order.
pub fn eligible_seasons(
    seasons: &[SeasonAvailability],
    perms: PermissionSet,
    series_4k_enabled: bool,
) -> impl Iterator<Item = &SeasonAvailability> {
    let four_k = can_report_4k(perms, series_4k_enabled);
    seasons.iter().filter(move |s| is_eligible(s, four_k))
}

/// Season numbers a viewer may report against, in input order. Empty when
/// none qualify.
pub fn resolve(
    seasons: &[SeasonAvailability],
    perms: PermissionSet,
    series_4k_enabled: bool,
) -> Vec<u32> {
    eligible_seasons(seasons, perms, series_4k_enabled)
        .map(|s| s.season_number)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::AvailabilityStatus::{
        Available, Deleted, PartiallyAvailable, Pending, Processing, Unknown,
    };

    const ALL_STATUSES: [AvailabilityStatus; 6] = [
        Unknown,
        Pending,
        Processing,
        PartiallyAvailable,
        Available,
        Deleted,
    ];

    fn season(
        n: u32,
        status: AvailabilityStatus,
        status_4k: AvailabilityStatus,
    ) -> SeasonAvailability {
        SeasonAvailability {
            season_number: n,
            status,
            status_4k,
            episode_count: 10,
        }
    }

    #[test]
    fn regular_availability_is_enough() {
        let seasons = [
            season(1, Available, Unknown),
            season(2, PartiallyAvailable, Unknown),
            season(3, Processing, Unknown),
        ];
        assert_eq!(resolve(&seasons, PermissionSet::default(), false), vec![1, 2]);
    }

    #[test]
    fn four_k_only_season_needs_flag_and_permission() {
        let seasons = [season(1, Pending, Available)];
        let four_k = PermissionSet::from_iter([Permission::Request4kTv]);

        assert!(resolve(&seasons, four_k, false).is_empty());
        assert!(resolve(&seasons, PermissionSet::default(), true).is_empty());
        assert_eq!(resolve(&seasons, four_k, true), vec![1]);
        assert_eq!(
            resolve(&seasons, PermissionSet::from_iter([Permission::Request4k]), true),
            vec![1]
        );
        assert!(
            resolve(&seasons, PermissionSet::from_iter([Permission::Request4kMovie]), true)
                .is_empty()
        );
    }

    #[test]
    fn input_order_is_preserved() {
        let seasons = [
            season(3, Available, Unknown),
            season(0, Available, Unknown),
            season(1, Available, Unknown),
        ];
        assert_eq!(resolve(&seasons, PermissionSet::default(), false), vec![3, 0, 1]);
    }

    #[test]
    fn no_eligible_season_yields_empty() {
        assert!(resolve(&[], PermissionSet::default(), true).is_empty());
        let seasons = [season(1, Deleted, Deleted)];
        let admin = PermissionSet::from_iter([Permission::Admin]);
        assert!(resolve(&seasons, admin, true).is_empty());
    }

    #[test]
    fn never_returns_a_season_without_files_or_without_4k_rights() {
        let perm_sets = [
            PermissionSet::default(),
            PermissionSet::from_iter([Permission::Request4k]),
            PermissionSet::from_iter([Permission::Request4kTv]),
            PermissionSet::from_iter([Permission::Request4kMovie]),
        ];
        for status in ALL_STATUSES {
            for status_4k in ALL_STATUSES {
                let seasons = [season(1, status, status_4k)];
                for perms in perm_sets {
                    for flag in [false, true] {
                        let resolved = resolve(&seasons, perms, flag);
                        if resolved.is_empty() {
                            continue;
                        }
                        assert!(status.has_files() || status_4k.has_files());
                        if !status.has_files() {
                            assert!(flag, "4K-only season leaked with 4K disabled");
                            assert!(
                                perms.has_any(&FOUR_K_SERIES_PERMISSIONS),
                                "4K-only season leaked without permission"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn predicates_compose_independently() {
        assert!(can_report_4k(PermissionSet::from_iter([Permission::Admin]), true));
        assert!(!can_report_4k(PermissionSet::from_iter([Permission::Admin]), false));
        assert!(is_eligible(&season(1, Unknown, PartiallyAvailable), true));
        assert!(!is_eligible(&season(1, Unknown, PartiallyAvailable), false));
    }
}
