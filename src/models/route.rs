//! Hash-based routing for the admin console.

/// Application routes for hash-based navigation.
/// URL format: `#/festivals`, `#/festivals/{id}`, `#/posters`,
/// `#/posters/new`, `#/posters/{id}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// Festival list and create form: #/festivals
    Festivals,
    /// Festival detail/edit: #/festivals/{id}
    FestivalDetail { id: String },
    /// Poster list scoped by the selected festival: #/posters
    Posters,
    /// New poster registration: #/posters/new
    PosterNew,
    /// Poster detail/edit: #/posters/{id}
    PosterDetail { id: String },
}

impl AppRoute {
    /// Parse a URL hash into a route. Unknown hashes land on the festival list.
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        match (segments.next(), segments.next()) {
            (Some("festivals"), None) => Self::Festivals,
            (Some("festivals"), Some(id)) => Self::FestivalDetail { id: id.to_string() },
            (Some("posters"), None) => Self::Posters,
            (Some("posters"), Some("new")) => Self::PosterNew,
            (Some("posters"), Some(id)) => Self::PosterDetail { id: id.to_string() },
            _ => Self::Festivals,
        }
    }

    /// Convert the route to a URL hash.
    pub fn to_hash(&self) -> String {
        match self {
            Self::Festivals => "#/festivals".to_string(),
            Self::FestivalDetail { id } => format!("#/festivals/{}", id),
            Self::Posters => "#/posters".to_string(),
            Self::PosterNew => "#/posters/new".to_string(),
            Self::PosterDetail { id } => format!("#/posters/{}", id),
        }
    }

    /// Get the current route from the browser URL.
    pub fn current() -> Self {
        let hash = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        Self::from_hash(&hash)
    }

    /// Navigate to this route by updating the URL hash.
    ///
    /// Setting the hash fires `hashchange`, which the router listens for,
    /// so no direct state update is needed here.
    pub fn push(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(&self.to_hash());
        }
    }

    /// Whether `self` and `other` belong to the same sidebar section.
    pub fn same_section(&self, other: &Self) -> bool {
        let section = |r: &Self| match r {
            Self::Festivals | Self::FestivalDetail { .. } => 0,
            Self::Posters | Self::PosterNew | Self::PosterDetail { .. } => 1,
        };
        section(self) == section(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(AppRoute::from_hash(""), AppRoute::Festivals);
        assert_eq!(AppRoute::from_hash("#"), AppRoute::Festivals);
        assert_eq!(AppRoute::from_hash("#/"), AppRoute::Festivals);
        assert_eq!(AppRoute::from_hash("#/festivals"), AppRoute::Festivals);
        assert_eq!(AppRoute::from_hash("#/festivals/"), AppRoute::Festivals);
        assert_eq!(
            AppRoute::from_hash("#/festivals/f1"),
            AppRoute::FestivalDetail {
                id: "f1".to_string()
            }
        );
        assert_eq!(AppRoute::from_hash("#/posters"), AppRoute::Posters);
        assert_eq!(AppRoute::from_hash("#/posters/new"), AppRoute::PosterNew);
        assert_eq!(
            AppRoute::from_hash("#/posters/p42"),
            AppRoute::PosterDetail {
                id: "p42".to_string()
            }
        );
        // Unknown sections fall back to the festival list
        assert_eq!(AppRoute::from_hash("#/nonsense"), AppRoute::Festivals);
    }

    #[test]
    fn test_route_to_hash() {
        assert_eq!(AppRoute::Festivals.to_hash(), "#/festivals");
        assert_eq!(
            AppRoute::FestivalDetail {
                id: "f1".to_string()
            }
            .to_hash(),
            "#/festivals/f1"
        );
        assert_eq!(AppRoute::Posters.to_hash(), "#/posters");
        assert_eq!(AppRoute::PosterNew.to_hash(), "#/posters/new");
        assert_eq!(
            AppRoute::PosterDetail {
                id: "p42".to_string()
            }
            .to_hash(),
            "#/posters/p42"
        );
    }

    #[test]
    fn test_round_trip() {
        for hash in ["#/festivals", "#/festivals/f1", "#/posters", "#/posters/new"] {
            assert_eq!(AppRoute::from_hash(hash).to_hash(), hash);
        }
    }

    #[test]
    fn test_same_section() {
        let detail = AppRoute::FestivalDetail {
            id: "f1".to_string(),
        };
        assert!(detail.same_section(&AppRoute::Festivals));
        assert!(AppRoute::PosterNew.same_section(&AppRoute::Posters));
        assert!(!AppRoute::Posters.same_section(&AppRoute::Festivals));
    }
}
