//! Client list synchronizer state.
//!
//! [`ClientState`] is an immutable record. The only way to move it forward is
//! [`ClientState::apply`], which takes one discrete [`Event`] (user input or a network
//! completion) and returns the next state, or a [`Rejection`] that leaves the current
//! state as it was.
//!
//! Every network-bound operation is tracked in `in_flight`. A second request for an
//! operation that is still outstanding is rejected, so there is at most one create, one
//! fetch, and one save/delete per product id in flight at any time. `busy()` is true
//! while anything is in flight.

use crate::client::field::FieldEdit;
use crate::domain::product::{Product, ProductFields, ProductId};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

pub const FETCH_FAILED: &str =
    "Impossible de récupérer les produits. Veuillez vérifier la connexion au serveur.";
pub const CREATE_FAILED: &str = "Impossible d'ajouter le produit. Veuillez réessayer.";
pub const SAVE_FAILED: &str = "Impossible de mettre à jour le produit. Veuillez réessayer.";
pub const DELETE_FAILED: &str = "Impossible de supprimer le produit. Veuillez réessayer.";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Create,
    Save(ProductId),
    Delete(ProductId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    FetchRequested,
    Fetched(Vec<Product>),
    FetchFailed(String),
    DraftFieldChanged(FieldEdit),
    CreateRequested,
    CreateSucceeded(Product),
    CreateFailed(String),
    EditStarted(Product),
    EditFieldChanged(FieldEdit),
    EditCancelled,
    SaveRequested,
    SaveSucceeded(Product),
    SaveFailed { id: ProductId, detail: String },
    DeleteRequested(ProductId),
    DeleteSucceeded(ProductId),
    DeleteFailed { id: ProductId, detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Veuillez remplir tous les champs correctement.")]
    DraftIncomplete,
    #[error("{0:?} is already in flight")]
    AlreadyInFlight(Operation),
    #[error("no product is being edited")]
    NotEditing,
}

/// A failure surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub summary: &'static str,
    pub detail: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.summary, self.detail)
    }
}

/// Local prefilter for the create form. Looser than the server schema: it does not check
/// the upper rating bound, and it demands a strictly positive price.
pub fn draft_is_submittable(draft: &ProductFields) -> bool {
    !draft.name.is_empty() && !draft.kind.is_empty() && draft.price > 0.0 && draft.rating >= 0.0
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientState {
    products: Vec<Product>,
    editing: Option<Product>,
    draft: ProductFields,
    in_flight: HashSet<Operation>,
    notice: Option<Notice>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn editing(&self) -> Option<&Product> {
        self.editing.as_ref()
    }

    pub fn draft(&self) -> &ProductFields {
        &self.draft
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn is_in_flight(&self, op: &Operation) -> bool {
        self.in_flight.contains(op)
    }

    pub fn apply(&self, event: Event) -> Result<ClientState, Rejection> {
        let mut next = self.clone();
        match event {
            Event::FetchRequested => next.begin(Operation::Fetch)?,
            Event::Fetched(products) => {
                next.products = products;
                next.finish(&Operation::Fetch);
            }
            Event::FetchFailed(detail) => next.fail(&Operation::Fetch, FETCH_FAILED, detail),

            Event::DraftFieldChanged(edit) => edit.apply_to(&mut next.draft),
            Event::CreateRequested => {
                if !draft_is_submittable(&next.draft) {
                    return Err(Rejection::DraftIncomplete);
                }
                next.begin(Operation::Create)?;
            }
            Event::CreateSucceeded(product) => {
                // A fetch that finished first may already list the new product.
                match next.products.iter_mut().find(|p| p.id == product.id) {
                    Some(entry) => *entry = product,
                    None => next.products.push(product),
                }
                next.draft = ProductFields::default();
                next.finish(&Operation::Create);
            }
            Event::CreateFailed(detail) => next.fail(&Operation::Create, CREATE_FAILED, detail),

            Event::EditStarted(product) => next.editing = Some(product),
            Event::EditFieldChanged(edit) => {
                let editing = next.editing.as_mut().ok_or(Rejection::NotEditing)?;
                edit.apply_to(&mut editing.fields);
            }
            Event::EditCancelled => next.editing = None,
            Event::SaveRequested => {
                let id = next.editing.as_ref().ok_or(Rejection::NotEditing)?.id.clone();
                next.begin(Operation::Save(id))?;
            }
            Event::SaveSucceeded(product) => {
                let op = Operation::Save(product.id.clone());
                if next.editing.as_ref().is_some_and(|e| e.id == product.id) {
                    next.editing = None;
                }
                if let Some(entry) = next.products.iter_mut().find(|p| p.id == product.id) {
                    *entry = product;
                }
                next.finish(&op);
            }
            Event::SaveFailed { id, detail } => next.fail(&Operation::Save(id), SAVE_FAILED, detail),

            Event::DeleteRequested(id) => next.begin(Operation::Delete(id))?,
            Event::DeleteSucceeded(id) => {
                next.products.retain(|p| p.id != id);
                if next.editing.as_ref().is_some_and(|e| e.id == id) {
                    next.editing = None;
                }
                next.finish(&Operation::Delete(id));
            }
            Event::DeleteFailed { id, detail } => {
                next.fail(&Operation::Delete(id), DELETE_FAILED, detail)
            }
        }
        Ok(next)
    }

    fn begin(&mut self, op: Operation) -> Result<(), Rejection> {
        if self.in_flight.contains(&op) {
            return Err(Rejection::AlreadyInFlight(op));
        }
        self.in_flight.insert(op);
        self.notice = None;
        Ok(())
    }

    fn finish(&mut self, op: &Operation) {
        self.in_flight.remove(op);
    }

    fn fail(&mut self, op: &Operation, summary: &'static str, detail: String) {
        self.finish(op);
        self.notice = Some(Notice { summary, detail });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::from(id),
            fields: ProductFields {
                name: name.to_string(),
                kind: "Tool".to_string(),
                price: 10.0,
                rating: 3.0,
                warranty_years: 1.0,
                available: true,
            },
        }
    }

    fn loaded(products: Vec<Product>) -> ClientState {
        ClientState::new()
            .apply(Event::FetchRequested)
            .unwrap()
            .apply(Event::Fetched(products))
            .unwrap()
    }

    fn fill_draft(state: ClientState) -> ClientState {
        [
            FieldEdit::Name("Drill".to_string()),
            FieldEdit::Type("Tool".to_string()),
            FieldEdit::Price(49.99),
            FieldEdit::Rating(4.0),
        ]
        .into_iter()
        .fold(state, |s, edit| s.apply(Event::DraftFieldChanged(edit)).unwrap())
    }

    #[test]
    fn fetch_replaces_list_and_clears_busy() {
        let state = ClientState::new().apply(Event::FetchRequested).unwrap();
        assert!(state.busy());

        let state = state.apply(Event::Fetched(vec![product("a", "A")])).unwrap();
        assert!(!state.busy());
        assert_eq!(state.products().len(), 1);

        let state = state
            .apply(Event::FetchRequested)
            .unwrap()
            .apply(Event::Fetched(vec![product("b", "B"), product("c", "C")]))
            .unwrap();
        let ids: Vec<&str> = state.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn fetch_failure_keeps_list_and_sets_notice() {
        let state = loaded(vec![product("a", "A")]);
        let state = state
            .apply(Event::FetchRequested)
            .unwrap()
            .apply(Event::FetchFailed("connection refused".to_string()))
            .unwrap();

        assert_eq!(state.products().len(), 1);
        assert!(!state.busy());
        assert_eq!(state.notice().unwrap().summary, FETCH_FAILED);
    }

    #[test]
    fn incomplete_draft_is_rejected_locally() {
        let state = ClientState::new();
        assert_eq!(state.apply(Event::CreateRequested), Err(Rejection::DraftIncomplete));

        let state = fill_draft(state)
            .apply(Event::DraftFieldChanged(FieldEdit::Price(0.0)))
            .unwrap();
        assert_eq!(state.apply(Event::CreateRequested), Err(Rejection::DraftIncomplete));

        let state = state
            .apply(Event::DraftFieldChanged(FieldEdit::Price(5.0)))
            .unwrap()
            .apply(Event::DraftFieldChanged(FieldEdit::Rating(-1.0)))
            .unwrap();
        assert_eq!(state.apply(Event::CreateRequested), Err(Rejection::DraftIncomplete));
    }

    #[test]
    fn prefilter_is_looser_than_server_schema() {
        let state = fill_draft(ClientState::new())
            .apply(Event::DraftFieldChanged(FieldEdit::Rating(9.0)))
            .unwrap();
        assert!(state.apply(Event::CreateRequested).is_ok());
    }

    #[test]
    fn create_success_appends_and_resets_draft() {
        let state = fill_draft(loaded(vec![product("a", "A")]))
            .apply(Event::CreateRequested)
            .unwrap();
        assert!(state.is_in_flight(&Operation::Create));

        let state = state.apply(Event::CreateSucceeded(product("new", "Drill"))).unwrap();
        assert_eq!(state.products().len(), 2);
        assert_eq!(state.products()[1].id, ProductId::from("new"));
        assert_eq!(state.draft(), &ProductFields::default());
        assert!(!state.busy());
    }

    #[test]
    fn create_success_after_overlapping_fetch_keeps_ids_unique() {
        let created = product("new", "Drill");
        let state = fill_draft(ClientState::new())
            .apply(Event::CreateRequested)
            .unwrap()
            .apply(Event::FetchRequested)
            .unwrap()
            .apply(Event::Fetched(vec![product("a", "A"), created.clone()]))
            .unwrap()
            .apply(Event::CreateSucceeded(created.clone()))
            .unwrap();

        let ids: Vec<&str> = state.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "new"]);
        assert_eq!(state.draft(), &ProductFields::default());
        assert!(!state.busy());

        let state = state.apply(Event::DeleteRequested(created.id.clone())).unwrap();
        let state = state.apply(Event::DeleteSucceeded(created.id.clone())).unwrap();
        assert_eq!(state.products(), &[product("a", "A")]);
    }

    #[test]
    fn create_failure_keeps_draft() {
        let filled = fill_draft(ClientState::new());
        let state = filled
            .apply(Event::CreateRequested)
            .unwrap()
            .apply(Event::CreateFailed("\"rating\" must be less than or equal to 5".to_string()))
            .unwrap();

        assert_eq!(state.draft(), filled.draft());
        assert!(state.products().is_empty());
        assert!(!state.busy());
        assert_eq!(state.notice().unwrap().summary, CREATE_FAILED);
    }

    #[test]
    fn second_create_is_rejected_while_first_is_outstanding() {
        let state = fill_draft(ClientState::new()).apply(Event::CreateRequested).unwrap();
        assert_eq!(
            state.apply(Event::CreateRequested),
            Err(Rejection::AlreadyInFlight(Operation::Create))
        );
    }

    #[test]
    fn edits_touch_only_the_editing_copy() {
        let state = loaded(vec![product("a", "A")])
            .apply(Event::EditStarted(product("a", "A")))
            .unwrap()
            .apply(Event::EditFieldChanged(FieldEdit::Name("Renamed".to_string())))
            .unwrap();

        assert_eq!(state.editing().unwrap().fields.name, "Renamed");
        assert_eq!(state.products()[0].fields.name, "A");
    }

    #[test]
    fn starting_a_new_edit_replaces_the_current_one() {
        let state = loaded(vec![product("a", "A"), product("b", "B")])
            .apply(Event::EditStarted(product("a", "A")))
            .unwrap()
            .apply(Event::EditFieldChanged(FieldEdit::Price(99.0)))
            .unwrap()
            .apply(Event::EditStarted(product("b", "B")))
            .unwrap();

        let editing = state.editing().unwrap();
        assert_eq!(editing.id, ProductId::from("b"));
        assert_eq!(editing.fields.price, 10.0);
    }

    #[test]
    fn cancel_discards_edit() {
        let state = loaded(vec![product("a", "A")])
            .apply(Event::EditStarted(product("a", "A")))
            .unwrap()
            .apply(Event::EditCancelled)
            .unwrap();
        assert!(state.editing().is_none());
        assert!(!state.busy());
    }

    #[test]
    fn field_edit_or_save_without_edit_is_rejected() {
        let state = loaded(vec![]);
        assert_eq!(
            state.apply(Event::EditFieldChanged(FieldEdit::Available(false))),
            Err(Rejection::NotEditing)
        );
        assert_eq!(state.apply(Event::SaveRequested), Err(Rejection::NotEditing));
    }

    #[test]
    fn save_success_replaces_entry_and_clears_edit() {
        let state = loaded(vec![product("a", "A"), product("b", "B")])
            .apply(Event::EditStarted(product("b", "B")))
            .unwrap()
            .apply(Event::SaveRequested)
            .unwrap();
        assert!(state.is_in_flight(&Operation::Save(ProductId::from("b"))));

        let state = state.apply(Event::SaveSucceeded(product("b", "B2"))).unwrap();
        assert_eq!(state.products()[1].fields.name, "B2");
        assert_eq!(state.products()[0].fields.name, "A");
        assert!(state.editing().is_none());
        assert!(!state.busy());
    }

    #[test]
    fn save_failure_keeps_edit() {
        let editing = loaded(vec![product("a", "A")])
            .apply(Event::EditStarted(product("a", "A")))
            .unwrap()
            .apply(Event::EditFieldChanged(FieldEdit::Rating(7.0)))
            .unwrap();
        let state = editing
            .apply(Event::SaveRequested)
            .unwrap()
            .apply(Event::SaveFailed {
                id: ProductId::from("a"),
                detail: "rejected".to_string(),
            })
            .unwrap();

        assert_eq!(state.editing(), editing.editing());
        assert_eq!(state.products(), editing.products());
        assert!(!state.busy());
        assert_eq!(state.notice().unwrap().summary, SAVE_FAILED);
    }

    #[test]
    fn save_success_keeps_a_newer_edit_of_another_product() {
        let state = loaded(vec![product("a", "A"), product("b", "B")])
            .apply(Event::EditStarted(product("a", "A")))
            .unwrap()
            .apply(Event::SaveRequested)
            .unwrap()
            .apply(Event::EditStarted(product("b", "B")))
            .unwrap()
            .apply(Event::SaveSucceeded(product("a", "A2")))
            .unwrap();

        assert_eq!(state.editing().unwrap().id, ProductId::from("b"));
        assert_eq!(state.products()[0].fields.name, "A2");
    }

    #[test]
    fn guard_is_per_product() {
        let state = loaded(vec![product("a", "A"), product("b", "B")])
            .apply(Event::DeleteRequested(ProductId::from("a")))
            .unwrap();

        assert_eq!(
            state.apply(Event::DeleteRequested(ProductId::from("a"))),
            Err(Rejection::AlreadyInFlight(Operation::Delete(ProductId::from("a"))))
        );
        let state = state.apply(Event::DeleteRequested(ProductId::from("b"))).unwrap();
        assert!(state.busy());
    }

    #[test]
    fn delete_success_removes_entry() {
        let state = loaded(vec![product("a", "A"), product("b", "B")])
            .apply(Event::EditStarted(product("a", "A")))
            .unwrap()
            .apply(Event::DeleteRequested(ProductId::from("a")))
            .unwrap()
            .apply(Event::DeleteSucceeded(ProductId::from("a")))
            .unwrap();

        assert_eq!(state.products(), &[product("b", "B")]);
        assert!(state.editing().is_none());
        assert!(!state.busy());
    }

    #[test]
    fn delete_failure_leaves_list_unchanged() {
        let before = loaded(vec![product("a", "A")]);
        let state = before
            .apply(Event::DeleteRequested(ProductId::from("a")))
            .unwrap()
            .apply(Event::DeleteFailed {
                id: ProductId::from("a"),
                detail: "Produit non trouvé".to_string(),
            })
            .unwrap();

        assert_eq!(state.products(), before.products());
        assert!(!state.busy());
        assert_eq!(
            state.notice().unwrap().to_string(),
            format!("{} (Produit non trouvé)", DELETE_FAILED)
        );
    }

    #[test]
    fn rejection_leaves_state_untouched() {
        let state = fill_draft(ClientState::new()).apply(Event::CreateRequested).unwrap();
        let snapshot = state.clone();
        assert!(state.apply(Event::CreateRequested).is_err());
        assert_eq!(state, snapshot);
    }
}
