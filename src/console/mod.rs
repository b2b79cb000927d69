//! # Operator Console
//!
//! A line-oriented stand-in for the graphical shell. One [`Controller`] owns the current
//! [`View`] and moves between views explicitly; nothing else holds screen state.
//!
//! ```text
//! Home --1/purchase--> Form(Purchase) --back--> Home
//! Home --2/sale------> Form(Sale)     --back--> Home
//! Home --3/stock-----> (report printed) Home
//! Home --q/quit------> exit
//! ```
//!
//! Inside a form, `<product id> <quantity>` records the adjustment and keeps the form open.

use crate::clients::{CatalogClient, StockClient};
use crate::model::{AdjustmentKind, Product};
use tracing::debug;

const TITLE: &str = "Welcome to the official page of the Cobra distributor";

/// The screen currently shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Form {
        kind: AdjustmentKind,
        options: Vec<Product>,
    },
}

/// Whether the console keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What to show after one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Screen content to print, empty when the screen did not change.
    pub lines: Vec<String>,
    /// Transient one-line message.
    pub notification: Option<String>,
    pub flow: Flow,
}

impl Reply {
    fn screen(lines: Vec<String>) -> Self {
        Self {
            lines,
            notification: None,
            flow: Flow::Continue,
        }
    }

    fn notify(message: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            notification: Some(message.into()),
            flow: Flow::Continue,
        }
    }
}

/// Owns the view state and turns operator input into catalog reads and adjustments.
///
/// Holds clones of the system's clients; drop the controller before
/// [`StockSystem::shutdown`](crate::lifecycle::StockSystem::shutdown) so the ledger actor
/// can stop.
pub struct Controller {
    stock: StockClient,
    catalog: CatalogClient,
    view: View,
}

impl Controller {
    pub fn new(stock: StockClient, catalog: CatalogClient) -> Self {
        Self {
            stock,
            catalog,
            view: View::Home,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// The current screen.
    pub fn render(&self) -> Vec<String> {
        match &self.view {
            View::Home => vec![
                TITLE.to_string(),
                format!("  1) {}", AdjustmentKind::Purchase.title()),
                format!("  2) {}", AdjustmentKind::Sale.title()),
                "  3) View Stock".to_string(),
                "  q) Quit".to_string(),
            ],
            View::Form { kind, options } => {
                let mut lines = vec![kind.title().to_string()];
                lines.extend(
                    options
                        .iter()
                        .map(|product| format!("  {:>4}  {}", product.id.0, product.name)),
                );
                lines.push("Enter \"<product id> <quantity>\", or \"back\".".to_string());
                lines
            }
        }
    }

    /// Handles one line of operator input.
    pub async fn handle(&mut self, input: &str) -> Reply {
        let input = input.trim();
        debug!(view = ?self.view, input, "Console input");

        match &self.view {
            View::Home => self.handle_home(input).await,
            View::Form { kind, .. } => {
                let kind = *kind;
                self.handle_form(kind, input).await
            }
        }
    }

    async fn handle_home(&mut self, input: &str) -> Reply {
        match input.to_ascii_lowercase().as_str() {
            "" => Reply::screen(self.render()),
            "1" | "purchase" => self.open_form(AdjustmentKind::Purchase).await,
            "2" | "sale" => self.open_form(AdjustmentKind::Sale).await,
            "3" | "stock" => self.stock_report().await,
            "q" | "quit" => Reply {
                lines: Vec::new(),
                notification: None,
                flow: Flow::Quit,
            },
            other => Reply::notify(format!("Unknown command: {other}")),
        }
    }

    async fn handle_form(&mut self, kind: AdjustmentKind, input: &str) -> Reply {
        if input.eq_ignore_ascii_case("back") || input.eq_ignore_ascii_case("b") {
            self.view = View::Home;
            return Reply::screen(self.render());
        }

        let mut fields = input.split_whitespace();
        let raw_product = fields.next().unwrap_or("");
        let raw_quantity = fields.next().unwrap_or("");
        if fields.next().is_some() {
            return Reply::notify("Please select a product and enter a valid quantity.");
        }

        match self.stock.record(kind, raw_product, raw_quantity).await {
            Ok(result) => {
                let label = match kind {
                    AdjustmentKind::Purchase => "Purchase recorded.",
                    AdjustmentKind::Sale => "Sale recorded.",
                };
                match result.new_quantity {
                    Some(quantity) => Reply::notify(format!("{label} New stock: {quantity}.")),
                    None => Reply::notify(label),
                }
            }
            Err(e) => Reply::notify(e.notification()),
        }
    }

    async fn open_form(&mut self, kind: AdjustmentKind) -> Reply {
        let options = self.catalog.list_products().await;
        if options.is_empty() {
            return Reply::notify("No products available.");
        }
        self.view = View::Form { kind, options };
        Reply::screen(self.render())
    }

    async fn stock_report(&self) -> Reply {
        let stock = self.catalog.list_stock().await;
        if stock.is_empty() {
            return Reply::notify("No products in stock.");
        }

        let mut lines = vec![
            "Current Stock".to_string(),
            format!("  {:<24} {:>10}", "Product", "Quantity"),
        ];
        lines.extend(
            stock
                .iter()
                .map(|entry| format!("  {:<24} {:>10}", entry.name, entry.quantity)),
        );
        Reply::screen(lines)
    }
}
