use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constant::hard_limit;

use super::ProductModel;

fn dflt_line_quantity() -> u32 {
    1
}

// One persisted entry of the cart document, the product snapshot is kept
// inline (flattened) so the external checkout page can read the document
// without another catalog round trip. Documents written by older pages
// may omit `quantity` / `selected`, both fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineModel {
    #[serde(flatten)]
    pub product: ProductModel,
    #[serde(default = "dflt_line_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub selected: bool,
}

impl CartLineModel {
    pub fn display_amount(&self, exchange_rate: Decimal) -> Decimal {
        self.product.price * Decimal::from(self.quantity) * exchange_rate
    }
}

// a display-time coalesced view of all entries sharing one product id,
// the storage layer does not enforce uniqueness per id
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineGroup {
    pub product: ProductModel,
    pub quantity: u32,
    pub selected: bool,
    // positions of the member entries in the underlying sequence, view
    // layers feed these back into line-level operations
    pub positions: Vec<usize>,
}

// In-memory mirror of the persisted cart document, an ordered sequence
// of lines. Serialized form is the bare JSON array under the `cart`
// storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartModel {
    lines: Vec<CartLineModel>,
}

impl CartModel {
    pub fn lines(&self) -> &[CartLineModel] {
        self.lines.as_slice()
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // merge into the existing line of the same product, or append a new
    // line, returns the resulting quantity of the affected line
    pub fn add_product(&mut self, product: ProductModel) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
            line.quantity
        } else {
            self.lines.push(CartLineModel {
                product,
                quantity: 1,
                selected: false,
            });
            1
        }
    }

    // out-of-range positions are a no-op, callers log a diagnostic
    pub fn remove_line(&mut self, position: usize) -> bool {
        if position < self.lines.len() {
            let _discard = self.lines.remove(position);
            true
        } else {
            false
        }
    }

    // quantity never goes below the floor regardless of how negative the
    // given delta is, returns the new quantity only when it changed so
    // callers can skip a redundant persist
    pub fn update_quantity(&mut self, position: usize, delta: i64) -> Option<u32> {
        let line = self.lines.get_mut(position)?;
        let floor = hard_limit::MIN_LINE_QUANTITY as i64;
        let request = (line.quantity as i64).saturating_add(delta);
        let clamped = request.max(floor) as u32;
        if clamped != line.quantity {
            line.quantity = clamped;
            Some(clamped)
        } else {
            None
        }
    }

    pub fn set_line_selected(&mut self, position: usize, flag: bool) -> bool {
        if let Some(line) = self.lines.get_mut(position) {
            line.selected = flag;
            true
        } else {
            false
        }
    }

    // a display group maps to several underlying positions
    pub fn set_group_selected(&mut self, positions: &[usize], flag: bool) -> usize {
        let mut num_applied = 0;
        for p in positions.iter() {
            if self.set_line_selected(*p, flag) {
                num_applied += 1;
            }
        }
        num_applied
    }

    pub fn set_all_selected(&mut self, flag: bool) {
        self.lines.iter_mut().for_each(|l| {
            l.selected = flag;
        });
    }

    // select-all checkbox state, conjunction over every line, an empty
    // cart reports true
    pub fn all_selected(&self) -> bool {
        self.lines.iter().all(|l| l.selected)
    }

    pub fn any_selected(&self) -> bool {
        self.lines.iter().any(|l| l.selected)
    }

    // badge count, quantity-weighted
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn selected_lines(&self) -> Vec<&CartLineModel> {
        self.lines.iter().filter(|l| l.selected).collect()
    }

    // remove and return the selected lines, order of the remainder is
    // preserved
    pub fn take_selected(&mut self) -> Vec<CartLineModel> {
        let (taken, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.lines).into_iter().partition(|l| l.selected);
        self.lines = kept;
        taken
    }

    // coalesce entries sharing a product id for display, quantity summed,
    // group selection is the conjunction of its members
    pub fn grouped_lines(&self) -> Vec<CartLineGroup> {
        let mut groups: Vec<CartLineGroup> = Vec::new();
        for (position, line) in self.lines.iter().enumerate() {
            if let Some(g) = groups.iter_mut().find(|g| g.product.id == line.product.id) {
                g.quantity += line.quantity;
                g.selected = g.selected && line.selected;
                g.positions.push(position);
            } else {
                groups.push(CartLineGroup {
                    product: line.product.clone(),
                    quantity: line.quantity,
                    selected: line.selected,
                    positions: vec![position],
                });
            }
        }
        groups
    }

    pub fn total_display_price(&self, exchange_rate: Decimal) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.display_amount(exchange_rate))
            .sum()
    }
} // end of impl CartModel

impl From<Vec<CartLineModel>> for CartModel {
    fn from(value: Vec<CartLineModel>) -> Self {
        Self { lines: value }
    }
}
