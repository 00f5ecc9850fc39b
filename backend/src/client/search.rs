//! Public search page state.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::api::StampCardApi;
use super::card::StampCardView;
use super::model::Student;

pub const SEARCH_FAILED_MESSAGE: &str = "Error al buscar. Intenta de nuevo.";

/// Query, results and the selected card on the search page.
pub struct SearchPage {
    api: Arc<dyn StampCardApi>,
    query: String,
    results: Vec<Student>,
    searched: bool,
    error: Option<&'static str>,
    selected: Option<Student>,
}

impl SearchPage {
    pub fn new(api: Arc<dyn StampCardApi>) -> Self {
        Self {
            api,
            query: String::new(),
            results: Vec::new(),
            searched: false,
            error: None,
            selected: None,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Edit the query. Results from a finished search are discarded.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if self.searched {
            self.searched = false;
            self.results.clear();
        }
    }

    /// Run the search. A blank query does nothing.
    pub async fn submit(&mut self) {
        let term = self.query.trim();
        if term.is_empty() {
            return;
        }
        self.error = None;
        self.searched = false;
        match self.api.search(term).await {
            Ok(students) => {
                self.results = students;
                self.searched = true;
            }
            Err(failure) => {
                warn!(error = %failure, "participant search failed");
                self.error = Some(SEARCH_FAILED_MESSAGE);
            }
        }
    }

    /// Results of the last completed search.
    #[must_use]
    pub fn results(&self) -> &[Student] {
        &self.results
    }

    /// True once a search has completed and until the query changes.
    #[must_use]
    pub fn has_searched(&self) -> bool {
        self.searched
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error
    }

    /// `"1 resultado encontrado"` or `"{n} resultados encontrados"`.
    #[must_use]
    pub fn result_summary(&self) -> String {
        match self.results.len() {
            1 => "1 resultado encontrado".to_owned(),
            n => format!("{n} resultados encontrados"),
        }
    }

    /// Open the stamp card for one of the current results.
    ///
    /// The participant is fetched again so the card shows the current count.
    /// If that fetch fails the listed row is shown instead.
    pub async fn select(&mut self, id: Uuid) -> Option<StampCardView> {
        let listed = self.results.iter().position(|s| s.id == id)?;
        let student = match self.api.student(id).await {
            Ok(fresh) => {
                if let Some(row) = self.results.get_mut(listed) {
                    *row = fresh.clone();
                }
                fresh
            }
            Err(failure) => {
                warn!(%id, error = %failure, "card refresh failed; showing listed row");
                self.results.get(listed)?.clone()
            }
        };
        let card = StampCardView::new(&student);
        self.selected = Some(student);
        Some(card)
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<StampCardView> {
        self.selected.as_ref().map(StampCardView::new)
    }

    pub fn close_card(&mut self) {
        self.selected = None;
    }
}
