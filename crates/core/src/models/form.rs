use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetPatch, AssetType, NewAsset};

/// State of the add/edit asset form.
///
/// Immutable value: every change goes through [`AssetForm::reduce`], which
/// returns the next state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetForm {
    /// Set when an existing asset is being edited.
    pub id: Option<i64>,
    pub name: String,
    pub symbol: String,
    pub asset_type: AssetType,
    pub amount: f64,
    pub buy_price: f64,
}

/// A single change to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetName(String),
    SetSymbol(String),
    SetType(AssetType),
    SetAmount(f64),
    SetBuyPrice(f64),
    /// Load an existing asset for editing.
    Edit(Asset),
    /// Clear the form (also cancels an edit).
    Reset,
}

/// What submitting the form sends to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Create(NewAsset),
    Update { id: i64, patch: AssetPatch },
}

impl AssetForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(self, action: FormAction) -> Self {
        match action {
            FormAction::SetName(name) => Self { name, ..self },
            FormAction::SetSymbol(symbol) => Self { symbol, ..self },
            FormAction::SetType(asset_type) => Self { asset_type, ..self },
            FormAction::SetAmount(amount) => Self { amount, ..self },
            FormAction::SetBuyPrice(buy_price) => Self { buy_price, ..self },
            FormAction::Edit(asset) => Self {
                id: Some(asset.id),
                name: asset.name,
                symbol: asset.symbol,
                asset_type: asset.asset_type,
                amount: asset.amount,
                buy_price: asset.buy_price,
            },
            FormAction::Reset => Self::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Create when no id is set, otherwise a full-field update of that id.
    /// `current_price` is never part of a form submission.
    pub fn submission(&self) -> FormSubmission {
        match self.id {
            None => FormSubmission::Create(NewAsset {
                name: self.name.clone(),
                symbol: self.symbol.clone(),
                asset_type: self.asset_type,
                amount: self.amount,
                buy_price: self.buy_price,
            }),
            Some(id) => FormSubmission::Update {
                id,
                patch: AssetPatch {
                    name: Some(self.name.clone()),
                    symbol: Some(self.symbol.clone()),
                    asset_type: Some(self.asset_type),
                    amount: Some(self.amount),
                    buy_price: Some(self.buy_price),
                    current_price: None,
                },
            },
        }
    }
}
