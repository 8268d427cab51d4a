use serde::{Deserialize, Serialize};
use std::fmt;

/// Association office held by a user. Serialized with the labels the
/// frontend has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    #[serde(rename = "Président")]
    President,
    #[serde(rename = "Trésorier")]
    Tresorier,
    #[serde(rename = "CommissaireAuxComptes")]
    CommissaireAuxComptes,
    #[serde(rename = "Censeur")]
    Censeur,
    #[serde(rename = "PrésidentDuComite")]
    PresidentDuComite,
    #[default]
    #[serde(rename = "Membre")]
    Membre,
}

/// Guarded resource families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    #[serde(rename = "membres")]
    Members,
    #[serde(rename = "cotisations")]
    Dues,
    #[serde(rename = "prets")]
    Loans,
    #[serde(rename = "aides")]
    Aid,
    #[serde(rename = "utilisateurs")]
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::President => "Président",
            Role::Tresorier => "Trésorier",
            Role::CommissaireAuxComptes => "CommissaireAuxComptes",
            Role::Censeur => "Censeur",
            Role::PresidentDuComite => "PrésidentDuComite",
            Role::Membre => "Membre",
        }
    }

    /// Role-to-permission matrix.
    pub fn can(&self, resource: Resource, access: Access) -> bool {
        use Resource::*;
        match (self, resource, access) {
            (Role::President, _, _) => true,
            (Role::Tresorier, Dues | Loans | Aid, _) => true,
            (Role::CommissaireAuxComptes | Role::Censeur, Dues, Access::Read) => true,
            (Role::PresidentDuComite, Members | Dues, _) => true,
            _ => false,
        }
    }

    /// Resources shown on the dashboard for this role.
    pub fn features(&self) -> Vec<Resource> {
        [Resource::Members, Resource::Dues, Resource::Aid, Resource::Loans]
            .into_iter()
            .filter(|resource| self.can(*resource, Access::Read))
            .collect()
    }

    /// Dashboard title and description.
    pub fn welcome(&self) -> (&'static str, &'static str) {
        match self {
            Role::President => (
                "Bienvenue, Président de l'association !",
                "Vous avez accès à toutes les fonctionnalités de gestion de la communauté.",
            ),
            Role::Tresorier => (
                "Bienvenue, Trésorier !",
                "Vous pouvez gérer les cotisations, les aides et les prêts des membres.",
            ),
            Role::CommissaireAuxComptes => (
                "Bienvenue, Commissaire aux Comptes !",
                "Vous avez accès à la vérification des cotisations.",
            ),
            Role::Censeur => (
                "Bienvenue, Censeur !",
                "Vous pouvez consulter et vérifier les cotisations des membres.",
            ),
            Role::PresidentDuComite => (
                "Bienvenue, Président du Comité !",
                "Vous pouvez gérer les membres et suivre les cotisations.",
            ),
            Role::Membre => (
                "Bienvenue, Membre de la communauté !",
                "Consultez vos informations et restez à jour avec la communauté.",
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn president_can_do_everything() {
        for resource in [Resource::Members, Resource::Dues, Resource::Loans, Resource::Aid, Resource::Users] {
            assert!(Role::President.can(resource, Access::Read));
            assert!(Role::President.can(resource, Access::Write));
        }
    }

    #[test]
    fn treasurer_manages_money_but_not_members() {
        assert!(Role::Tresorier.can(Resource::Loans, Access::Write));
        assert!(Role::Tresorier.can(Resource::Aid, Access::Write));
        assert!(Role::Tresorier.can(Resource::Dues, Access::Read));
        assert!(!Role::Tresorier.can(Resource::Members, Access::Read));
        assert!(!Role::Tresorier.can(Resource::Users, Access::Read));
    }

    #[test]
    fn auditors_only_read_dues() {
        for role in [Role::CommissaireAuxComptes, Role::Censeur] {
            assert!(role.can(Resource::Dues, Access::Read));
            assert!(!role.can(Resource::Dues, Access::Write));
            assert!(!role.can(Resource::Loans, Access::Read));
        }
    }

    #[test]
    fn plain_member_sees_no_feature() {
        assert!(Role::Membre.features().is_empty());
        assert_eq!(
            Role::PresidentDuComite.features(),
            vec![Resource::Members, Resource::Dues]
        );
    }

    #[test]
    fn labels_round_trip_through_serde() {
        let roles = [
            Role::President,
            Role::Tresorier,
            Role::CommissaireAuxComptes,
            Role::Censeur,
            Role::PresidentDuComite,
            Role::Membre,
        ];
        for role in roles {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(serde_json::from_str::<Role>(&json).unwrap(), role);
        }
        assert!(serde_json::from_str::<Role>("\"Roi\"").is_err());
    }
}
