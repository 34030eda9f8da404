//! Toast presentation of classified share changes.
//!
//! Turns a [`ShareChange`] into one localized toast: resolve the owner's
//! display name (falling back to a short id when the profile is missing
//! or the lookup fails), pick the wording for the locale and count, and
//! hand the toast to the configured sink. Presentation never fails; a
//! broken profile lookup degrades the text, not the notification.

use std::fmt;
use std::sync::Arc;

use renohub_core::events::ShareChange;
use renohub_core::traits::profiles::ProfileResolver;
use renohub_core::traits::toast::ToastSink;
use renohub_core::types::id::UserId;
use renohub_core::types::toast::Toast;
use tracing::debug;

use crate::plural::{Locale, PluralCategory};

/// Renders classified share changes into localized toasts.
pub struct ToastPresenter {
    locale: Locale,
    profiles: Arc<dyn ProfileResolver>,
    sink: Arc<dyn ToastSink>,
}

impl ToastPresenter {
    pub fn new(
        locale: Locale,
        profiles: Arc<dyn ProfileResolver>,
        sink: Arc<dyn ToastSink>,
    ) -> Self {
        Self {
            locale,
            profiles,
            sink,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Present one classified change as an informational toast.
    pub async fn present(&self, change: &ShareChange) {
        let owner_name = self.resolve_name(change.owner_id()).await;
        let body = match change {
            ShareChange::Granted { project_ids, .. } => {
                granted_body(self.locale, &owner_name, project_ids.len())
            }
            ShareChange::Revoked { project_ids, .. } => {
                revoked_body(self.locale, &owner_name, project_ids.len())
            }
        };

        debug!(
            owner = %change.owner_id(),
            count = change.project_count(),
            locale = self.locale.as_str(),
            "presenting share change"
        );
        self.sink.show(Toast::info(body)).await;
    }

    /// Present the once-per-streak toast for a failed snapshot delivery.
    pub async fn present_delivery_error(&self) {
        let body = match self.locale {
            Locale::En => "Couldn't load shared projects",
            Locale::Pl => "Nie udało się wczytać udostępnionych projektów",
            Locale::Ru => "Не удалось загрузить общие проекты",
        };
        self.sink.show(Toast::error(body)).await;
    }

    async fn resolve_name(&self, owner: UserId) -> String {
        match self.profiles.display_name(owner).await {
            Ok(Some(name)) => name,
            Ok(None) => short_id(owner),
            Err(error) => {
                debug!(%owner, %error, "profile lookup failed, falling back to id");
                short_id(owner)
            }
        }
    }
}

impl fmt::Debug for ToastPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastPresenter")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// Short display fallback when no profile name is known.
fn short_id(user: UserId) -> String {
    user.to_string()[..8].to_string()
}

fn granted_body(locale: Locale, name: &str, count: usize) -> String {
    use PluralCategory::*;
    match (locale, locale.plural_category(count)) {
        (Locale::En, One) => format!("{name} shared a project with you"),
        (Locale::En, _) => format!("{name} shared {count} projects with you"),
        (Locale::Pl, One) => format!("Użytkownik {name} udostępnił Ci projekt"),
        (Locale::Pl, Few) => format!("Użytkownik {name} udostępnił Ci {count} projekty"),
        (Locale::Pl, _) => format!("Użytkownik {name} udostępnił Ci {count} projektów"),
        (Locale::Ru, One) => {
            format!("Пользователь {name} открыл вам доступ: {count} проект")
        }
        (Locale::Ru, Few) => {
            format!("Пользователь {name} открыл вам доступ: {count} проекта")
        }
        (Locale::Ru, _) => {
            format!("Пользователь {name} открыл вам доступ: {count} проектов")
        }
    }
}

fn revoked_body(locale: Locale, name: &str, count: usize) -> String {
    use PluralCategory::*;
    match (locale, locale.plural_category(count)) {
        (Locale::En, One) => format!("{name} stopped sharing a project with you"),
        (Locale::En, _) => format!("{name} stopped sharing {count} projects with you"),
        (Locale::Pl, One) => format!("Użytkownik {name} cofnął Ci dostęp: {count} projekt"),
        (Locale::Pl, Few) => format!("Użytkownik {name} cofnął Ci dostęp: {count} projekty"),
        (Locale::Pl, _) => format!("Użytkownik {name} cofnął Ci dostęp: {count} projektów"),
        (Locale::Ru, One) => {
            format!("Пользователь {name} закрыл вам доступ: {count} проект")
        }
        (Locale::Ru, Few) => {
            format!("Пользователь {name} закрыл вам доступ: {count} проекта")
        }
        (Locale::Ru, _) => {
            format!("Пользователь {name} закрыл вам доступ: {count} проектов")
        }
    }
}
