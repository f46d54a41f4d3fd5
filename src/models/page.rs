use serde::Deserialize;

/// List envelope returned by every admin collection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// Filter and pagination state a store builds its query string from.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search: None,
            status: None,
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            if !search.trim().is_empty() {
                params.push(("search", search.trim().to_string()));
            }
        }
        if let Some(status) = &self.status {
            params.push(("status", status.clone()));
        }
        params
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_skip_blank_search() {
        let mut query = ListQuery::new(25);
        query.search = Some("   ".to_string());
        let params = query.to_params();
        assert_eq!(
            params,
            vec![("page", "1".to_string()), ("limit", "25".to_string())]
        );
    }

    #[test]
    fn test_params_include_filters() {
        let mut query = ListQuery::new(10);
        query.page = 3;
        query.search = Some(" ganesha ".to_string());
        query.status = Some("CONFIRMED".to_string());
        let params = query.to_params();
        assert!(params.contains(&("page", "3".to_string())));
        assert!(params.contains(&("search", "ganesha".to_string())));
        assert!(params.contains(&("status", "CONFIRMED".to_string())));
    }
}
