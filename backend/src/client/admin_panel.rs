//! Admin panel state: the participant table, the create form, and
//! optimistic stamp and delete actions.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, warn};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::MAX_STAMPS;

use super::api::{ApiFailure, StampCardApi};
use super::flash::FlashBoard;
use super::model::{NewStudent, Student};
use super::optimistic::{Removal, Snapshot};
use super::session::{AdminSession, Navigation};

pub const BLANK_FIELDS_MESSAGE: &str = "Todos los campos son obligatorios";
pub const CREATE_FAILED_MESSAGE: &str = "Error al crear estudiante";
pub const UPDATE_FAILED_MESSAGE: &str = "Error al actualizar sellos";
pub const DELETE_FAILED_MESSAGE: &str = "Error al eliminar estudiante";

/// Header counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelStats {
    pub total: usize,
    pub with_stamps: usize,
    pub completed: usize,
}

/// Everything the admin view shows.
pub struct AdminPanel {
    api: Arc<dyn StampCardApi>,
    students: Vec<Student>,
    loading: bool,
    filter: String,
    form: NewStudent,
    form_open: bool,
    form_error: Option<String>,
    page_error: Option<String>,
    flash: FlashBoard,
}

impl AdminPanel {
    pub fn new(api: Arc<dyn StampCardApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            students: Vec::new(),
            loading: true,
            filter: String::new(),
            form: NewStudent::default(),
            form_open: false,
            form_error: None,
            page_error: None,
            flash: FlashBoard::new(clock),
        }
    }

    /// Load the table. Without a key, or with a rejected one, go to login.
    pub async fn open(&mut self, session: &mut AdminSession) -> Option<Navigation> {
        let Some(key) = current_key(session) else {
            return Some(Navigation::Login);
        };
        let outcome = self.api.list_students(&key).await;
        self.loading = false;
        match outcome {
            Ok(students) => {
                self.students = students;
                None
            }
            Err(failure) => self.reject(session, &failure, None),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every loaded participant, in table order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Rows matching the filter against `"nombre apellido codigo"`.
    #[must_use]
    pub fn visible(&self) -> Vec<&Student> {
        let needle = self.filter.to_lowercase();
        self.students
            .iter()
            .filter(|student| student.matches_filter(&needle))
            .collect()
    }

    /// Text shown when [`Self::visible`] is empty.
    #[must_use]
    pub fn empty_message(&self) -> &'static str {
        if self.filter.is_empty() {
            "No hay estudiantes registrados"
        } else {
            "No se encontraron resultados"
        }
    }

    #[must_use]
    pub fn stats(&self) -> PanelStats {
        PanelStats {
            total: self.students.len(),
            with_stamps: self.students.iter().filter(|s| s.sellos > 0).count(),
            completed: self.students.iter().filter(|s| s.is_complete()).count(),
        }
    }

    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
    }

    #[must_use]
    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn form_mut(&mut self) -> &mut NewStudent {
        &mut self.form
    }

    #[must_use]
    pub fn form(&self) -> &NewStudent {
        &self.form
    }

    #[must_use]
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    #[must_use]
    pub fn page_error(&self) -> Option<&str> {
        self.page_error.as_deref()
    }

    /// Success message still on screen, if any.
    #[must_use]
    pub fn flash(&self) -> Option<&str> {
        self.flash.visible()
    }

    /// Submit the create form. The new row goes to the top of the table.
    pub async fn create(&mut self, session: &mut AdminSession) -> Option<Navigation> {
        if self.form.has_blank_field() {
            self.form_error = Some(BLANK_FIELDS_MESSAGE.to_owned());
            return None;
        }
        let Some(key) = current_key(session) else {
            return Some(Navigation::Login);
        };
        self.form_error = None;
        match self.api.create_student(&key, &self.form).await {
            Ok(student) => {
                self.flash.raise(format!(
                    "✓ Estudiante {} agregado exitosamente",
                    student.nombre
                ));
                self.students.insert(0, student);
                self.form = NewStudent::default();
                self.form_open = false;
                None
            }
            Err(failure) if failure.is_auth_rejection() => self.reject(session, &failure, None),
            Err(failure) => {
                warn!(error = %failure, "create participant failed");
                self.form_error = Some(
                    failure
                        .server_message()
                        .unwrap_or(CREATE_FAILED_MESSAGE)
                        .to_owned(),
                );
                None
            }
        }
    }

    /// Add `delta` stamps, clamped to `[0, 7]`.
    ///
    /// The new count shows immediately and reverts if the server refuses it.
    /// A change that the clamp swallows issues no call.
    pub async fn adjust_stamps(
        &mut self,
        session: &mut AdminSession,
        id: Uuid,
        delta: i8,
    ) -> Option<Navigation> {
        let student = self.students.iter_mut().find(|s| s.id == id)?;
        let current = student.sellos;
        let target = clamp_stamps(current, delta);
        if target == current {
            debug!(%id, current, delta, "stamp change clamped to a no-op");
            return None;
        }
        let Some(key) = current_key(session) else {
            return Some(Navigation::Login);
        };

        self.page_error = None;
        let snapshot = Snapshot::replace(&mut student.sellos, target);
        let outcome = self.api.update_stamps(&key, id, target).await;
        match snapshot.settle(&mut student.sellos, outcome) {
            Ok(_) => {
                self.flash.raise(format!(
                    "✓ Sellos de {} actualizados a {target}",
                    student.nombre
                ));
                None
            }
            Err(failure) => self.reject(session, &failure, Some(UPDATE_FAILED_MESSAGE)),
        }
    }

    /// Remove a row immediately; put it back where it was if the server fails.
    pub async fn delete(&mut self, session: &mut AdminSession, id: Uuid) -> Option<Navigation> {
        let index = self.students.iter().position(|s| s.id == id)?;
        let Some(key) = current_key(session) else {
            return Some(Navigation::Login);
        };

        self.page_error = None;
        let removal = Removal::take(&mut self.students, index)?;
        let nombre = removal.item().nombre.clone();
        let outcome = self.api.delete_student(&key, id).await;
        match removal.settle(&mut self.students, outcome) {
            Ok(()) => {
                self.flash.raise(format!("✓ Estudiante {nombre} eliminado"));
                None
            }
            Err(failure) => self.reject(session, &failure, Some(DELETE_FAILED_MESSAGE)),
        }
    }

    /// Forget the key and leave the panel.
    pub fn logout(&mut self, session: &mut AdminSession) -> Navigation {
        session.sign_out();
        self.students.clear();
        Navigation::Home
    }

    fn reject(
        &mut self,
        session: &mut AdminSession,
        failure: &ApiFailure,
        fallback: Option<&str>,
    ) -> Option<Navigation> {
        if failure.is_auth_rejection() {
            warn!(error = %failure, "admin key no longer accepted");
            session.sign_out();
            return Some(Navigation::Login);
        }
        warn!(error = %failure, "admin action failed");
        if let Some(fallback) = fallback {
            self.page_error = Some(failure.server_message().unwrap_or(fallback).to_owned());
        }
        None
    }
}

impl std::fmt::Debug for AdminPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminPanel")
            .field("students", &self.students.len())
            .field("filter", &self.filter)
            .field("form_open", &self.form_open)
            .finish_non_exhaustive()
    }
}

fn current_key(session: &AdminSession) -> Option<Zeroizing<String>> {
    session.key().map(|key| Zeroizing::new(key.to_owned()))
}

fn clamp_stamps(current: u8, delta: i8) -> u8 {
    let step = delta.unsigned_abs();
    if delta >= 0 {
        current.saturating_add(step).min(MAX_STAMPS)
    } else {
        current.saturating_sub(step)
    }
}

#[cfg(test)]
#[path = "admin_panel_tests.rs"]
mod tests;
