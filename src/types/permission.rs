use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

/// Viewer capabilities relevant to issue reporting, as bit flags on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Admin,
    Request,
    Request4k,
    Request4kMovie,
    Request4kTv,
    ManageIssues,
    CreateIssues,
}

impl Permission {
    pub const fn bit(self) -> u64 {
        match self {
            Self::Admin => 2,
            Self::Request => 32,
            Self::Request4k => 1024,
            Self::Request4kMovie => 2048,
            Self::Request4kTv => 4096,
            Self::ManageIssues => 1_048_576,
            Self::CreateIssues => 4_194_304,
        }
    }
}

/// Bitmask of granted permissions. Serialized as a bare integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(u64);

impl PermissionSet {
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn with(self, permission: Permission) -> Self {
        Self(self.0 | permission.bit())
    }

    /// Whether `permission` is granted. Admins hold every permission.
    pub const fn has(self, permission: Permission) -> bool {
        self.0 & (permission.bit() | Permission::Admin.bit()) != 0
    }

    /// Any-of check over `permissions`. An empty slice is never satisfied
    /// unless the viewer is an admin.
    pub fn has_any(self, permissions: &[Permission]) -> bool {
        self.0 & Permission::Admin.bit() != 0 || permissions.iter().any(|p| self.has(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

// ---------------------------------------------------------------------------
// Viewer & settings
// ---------------------------------------------------------------------------

/// The signed-in user, from `GET /api/v1/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub id: u64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub permissions: PermissionSet,
}

/// Global settings exposed to every viewer, from `GET /api/v1/settings/public`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PublicSettings {
    #[serde(default, rename = "series4kEnabled")]
    pub series_4k_enabled: bool,
}
