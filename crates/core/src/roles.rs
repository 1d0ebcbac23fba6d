//! Admin roles and the static role-to-permission table.
//!
//! Permissions are granted in bulk per role. The table is a pure lookup:
//! there is no dynamic assignment, no inheritance, and no runtime mutation.
//! Role names must match the seed data in the `admin_users` migration.

use serde::{Deserialize, Serialize};

/// The four admin roles, ordered roughly by breadth of access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    Csr,
    FraudAnalyst,
    Supervisor,
    Admin,
}

impl AdminRole {
    /// The canonical string stored in `admin_users.role` and JWT claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Csr => "CSR",
            AdminRole::FraudAnalyst => "FRAUD_ANALYST",
            AdminRole::Supervisor => "SUPERVISOR",
            AdminRole::Admin => "ADMIN",
        }
    }

    /// Parse a stored role string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CSR" => Some(AdminRole::Csr),
            "FRAUD_ANALYST" => Some(AdminRole::FraudAnalyst),
            "SUPERVISOR" => Some(AdminRole::Supervisor),
            "ADMIN" => Some(AdminRole::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability labels checked by admin routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewCustomers,
    ViewCards,
    LockCards,
    UnlockCards,
    ViewTransactions,
    ViewDisputes,
    ManageDisputes,
    ViewAlerts,
    ManageAlerts,
    ManageNotes,
    ViewAuditLogs,
    ManageAdmins,
}

impl Permission {
    /// The label echoed back in 403 bodies and audit descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewCustomers => "VIEW_CUSTOMERS",
            Permission::ViewCards => "VIEW_CARDS",
            Permission::LockCards => "LOCK_CARDS",
            Permission::UnlockCards => "UNLOCK_CARDS",
            Permission::ViewTransactions => "VIEW_TRANSACTIONS",
            Permission::ViewDisputes => "VIEW_DISPUTES",
            Permission::ManageDisputes => "MANAGE_DISPUTES",
            Permission::ViewAlerts => "VIEW_ALERTS",
            Permission::ManageAlerts => "MANAGE_ALERTS",
            Permission::ManageNotes => "MANAGE_NOTES",
            Permission::ViewAuditLogs => "VIEW_AUDIT_LOGS",
            Permission::ManageAdmins => "MANAGE_ADMINS",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The static permission set granted to a role.
pub fn permissions_for(role: AdminRole) -> &'static [Permission] {
    match role {
        AdminRole::Csr => &[
            Permission::ViewCustomers,
            Permission::ViewCards,
            Permission::ViewTransactions,
            Permission::ViewDisputes,
            Permission::ViewAlerts,
            Permission::LockCards,
            Permission::ManageNotes,
        ],
        AdminRole::FraudAnalyst => &[
            Permission::ViewCustomers,
            Permission::ViewCards,
            Permission::ViewTransactions,
            Permission::ViewDisputes,
            Permission::ViewAlerts,
            Permission::LockCards,
            Permission::UnlockCards,
            Permission::ManageDisputes,
            Permission::ManageAlerts,
            Permission::ManageNotes,
        ],
        AdminRole::Supervisor => &[
            Permission::ViewCustomers,
            Permission::ViewCards,
            Permission::ViewTransactions,
            Permission::ViewDisputes,
            Permission::ViewAlerts,
            Permission::LockCards,
            Permission::UnlockCards,
            Permission::ManageDisputes,
            Permission::ManageAlerts,
            Permission::ManageNotes,
            Permission::ViewAuditLogs,
        ],
        AdminRole::Admin => &[
            Permission::ViewCustomers,
            Permission::ViewCards,
            Permission::ViewTransactions,
            Permission::ViewDisputes,
            Permission::ViewAlerts,
            Permission::LockCards,
            Permission::UnlockCards,
            Permission::ManageDisputes,
            Permission::ManageAlerts,
            Permission::ManageNotes,
            Permission::ViewAuditLogs,
            Permission::ManageAdmins,
        ],
    }
}

/// Whether `role` holds `permission`. Pure lookup against the static table.
pub fn role_has(role: AdminRole, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Whether `role` holds at least one of `permissions` (any-of check).
pub fn role_has_any(role: AdminRole, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| role_has(role, *p))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Permissions every role is expected to hold.
    const VIEW_SET: &[Permission] = &[
        Permission::ViewCustomers,
        Permission::ViewCards,
        Permission::ViewTransactions,
        Permission::ViewDisputes,
        Permission::ViewAlerts,
    ];

    #[test]
    fn role_string_round_trip() {
        for role in [
            AdminRole::Csr,
            AdminRole::FraudAnalyst,
            AdminRole::Supervisor,
            AdminRole::Admin,
        ] {
            assert_eq!(AdminRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(AdminRole::parse("INTERN"), None);
    }

    #[test]
    fn csr_can_lock_but_not_unlock() {
        assert!(role_has(AdminRole::Csr, Permission::LockCards));
        assert!(!role_has(AdminRole::Csr, Permission::UnlockCards));
    }

    #[test]
    fn csr_cannot_manage_disputes() {
        assert!(role_has(AdminRole::Csr, Permission::ViewDisputes));
        assert!(!role_has(AdminRole::Csr, Permission::ManageDisputes));
    }

    #[test]
    fn fraud_analyst_manages_disputes_and_alerts() {
        assert!(role_has(AdminRole::FraudAnalyst, Permission::ManageDisputes));
        assert!(role_has(AdminRole::FraudAnalyst, Permission::ManageAlerts));
        assert!(!role_has(AdminRole::FraudAnalyst, Permission::ViewAuditLogs));
    }

    #[test]
    fn only_admin_manages_admins() {
        assert!(role_has(AdminRole::Admin, Permission::ManageAdmins));
        for role in [AdminRole::Csr, AdminRole::FraudAnalyst, AdminRole::Supervisor] {
            assert!(!role_has(role, Permission::ManageAdmins));
        }
    }

    #[test]
    fn admin_holds_every_permission() {
        for perm in [
            Permission::ViewCustomers,
            Permission::ViewCards,
            Permission::LockCards,
            Permission::UnlockCards,
            Permission::ViewTransactions,
            Permission::ViewDisputes,
            Permission::ManageDisputes,
            Permission::ViewAlerts,
            Permission::ManageAlerts,
            Permission::ManageNotes,
            Permission::ViewAuditLogs,
            Permission::ManageAdmins,
        ] {
            assert!(role_has(AdminRole::Admin, perm), "admin missing {perm}");
        }
    }

    #[test]
    fn any_of_check() {
        assert!(role_has_any(
            AdminRole::Csr,
            &[Permission::ManageDisputes, Permission::ViewCards],
        ));
        assert!(!role_has_any(
            AdminRole::Csr,
            &[Permission::ManageDisputes, Permission::ViewAuditLogs],
        ));
    }

    #[test]
    fn view_set_is_subset_of_every_role() {
        for role in [
            AdminRole::Csr,
            AdminRole::FraudAnalyst,
            AdminRole::Supervisor,
            AdminRole::Admin,
        ] {
            for perm in VIEW_SET {
                assert!(role_has(role, *perm), "{role} missing {perm}");
            }
        }
    }
}
