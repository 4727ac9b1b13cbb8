//! Two-step delete: a request opens the dialog, only confirm deletes.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub description: String,
}

impl PendingDelete {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }

    pub fn message(&self) -> String {
        if self.description.trim().is_empty() {
            "Are you sure you want to delete this transaction? This action cannot be undone."
                .to_string()
        } else {
            format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                self.description.trim()
            )
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    target: Option<PendingDelete>,
}

impl DeleteConfirmation {
    pub fn request(&mut self, target: PendingDelete) {
        self.target = Some(target);
    }

    pub fn cancel(&mut self) {
        self.target = None;
    }

    /// The id to delete. The dialog stays open until [Self::close] so it can
    /// show the pending state.
    pub fn confirm(&self) -> Option<String> {
        self.target.as_ref().map(|t| t.id.clone())
    }

    pub fn close(&mut self) {
        self.target = None;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&PendingDelete> {
        self.target.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::{DeleteConfirmation, PendingDelete};

    #[test]
    fn requesting_only_opens_the_dialog() {
        let mut dialog = DeleteConfirmation::default();

        dialog.request(PendingDelete::new("t1", "Coffee"));

        assert!(dialog.is_open());
        assert_eq!(dialog.target().map(|t| t.id.as_str()), Some("t1"));
    }

    #[test]
    fn cancel_never_yields_an_id() {
        let mut dialog = DeleteConfirmation::default();
        dialog.request(PendingDelete::new("t1", "Coffee"));

        dialog.cancel();

        assert!(!dialog.is_open());
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn confirm_yields_id_and_keeps_dialog_until_closed() {
        let mut dialog = DeleteConfirmation::default();
        dialog.request(PendingDelete::new("t1", "Coffee"));

        assert_eq!(dialog.confirm(), Some("t1".to_string()));
        assert!(dialog.is_open());

        dialog.close();
        assert!(!dialog.is_open());
    }

    #[test]
    fn message_names_the_transaction() {
        assert_eq!(
            PendingDelete::new("t1", " Coffee ").message(),
            "Are you sure you want to delete \"Coffee\"? This action cannot be undone."
        );
        assert!(PendingDelete::new("t1", "").message().contains("this transaction"));
    }
}
