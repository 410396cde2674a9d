pub mod api;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use tracing::debug;

use api::traits::OrderApi;
use models::{
    group::ShopGroup,
    ledger::CartLedger,
    line::{CartLine, LineKey},
    order::{CheckoutForm, OrderDraft, PlacedOrder},
    settings::CheckoutSettings,
};
use services::{checkout_service::CheckoutService, grouping_service::GroupingService};
use storage::manager::StorageManager;
use storage::slot::{CartSlot, MemorySlot};

use errors::CartError;

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
pub type ListenerId = u64;

type Listener = Box<dyn Fn(&CartLedger)>;

/// Main entry point for the storefront cart core library.
///
/// Owns the cart ledger and everything needed to operate on it: the durable
/// slot the cart is persisted to, the order API used at checkout, and the
/// stateless grouping/checkout services. Constructed once at application
/// start and handed by reference to every consumer — there is no ambient
/// global cart.
///
/// Every mutation follows the same discipline: apply it to the ledger,
/// notify subscribers, then persist fire-and-forget.
#[must_use]
pub struct CartStore {
    ledger: CartLedger,
    settings: CheckoutSettings,
    grouping_service: GroupingService,
    checkout_service: CheckoutService,
    slot: Box<dyn CartSlot>,
    order_api: Box<dyn OrderApi>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
    /// Draft of the last failed submission, kept so a retry of the same
    /// payload reuses its idempotency key.
    pending_draft: Option<OrderDraft>,
    submitting: bool,
    /// Bumped on every ledger change since the store was built.
    revision: u64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.ledger.len())
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .field("submitting", &self.submitting)
            .finish()
    }
}

impl CartStore {
    /// Open a store backed by the given slot, hydrating the cart from
    /// whatever the slot holds. Missing or corrupt persisted state degrades
    /// to an empty cart.
    pub fn open(slot: impl CartSlot + 'static, order_api: impl OrderApi + 'static) -> Self {
        Self::build(Box::new(slot), Box::new(order_api), CheckoutSettings::default())
    }

    /// Open a store with explicit checkout settings instead of the defaults.
    pub fn with_settings(
        slot: impl CartSlot + 'static,
        order_api: impl OrderApi + 'static,
        settings: CheckoutSettings,
    ) -> Self {
        Self::build(Box::new(slot), Box::new(order_api), settings)
    }

    /// Store with no durable persistence — cart state lives only for the
    /// session. Useful for tests and guest flows.
    pub fn in_memory(order_api: impl OrderApi + 'static) -> Self {
        Self::build(
            Box::new(MemorySlot::new()),
            Box::new(order_api),
            CheckoutSettings::default(),
        )
    }

    // ── Cart Mutations ──────────────────────────────────────────────

    /// Add a line to the cart. A line with the same identity (product +
    /// shop + variant) merges into the existing one by growing its quantity.
    pub fn add_line(&mut self, line: CartLine) -> Result<(), CartError> {
        self.ledger.add(line)?;
        self.after_mutation();
        Ok(())
    }

    /// Remove the line matching the key. Removing an absent line is a
    /// no-op. Returns whether a line was removed.
    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        let removed = self.ledger.remove(key);
        if removed {
            self.after_mutation();
        }
        removed
    }

    /// Set the quantity of the line matching the key. Quantities below 1
    /// are rejected as a no-op; removal is its own explicit operation.
    /// Returns whether the ledger changed.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) -> bool {
        let changed = self.ledger.set_quantity(key, quantity);
        if changed {
            self.after_mutation();
        }
        changed
    }

    /// Empty the cart. Called automatically after a successful checkout and
    /// by the explicit "empty cart" action.
    pub fn clear_cart(&mut self) {
        if self.ledger.is_empty() {
            return;
        }
        self.ledger.clear();
        self.after_mutation();
    }

    // ── Cart State ──────────────────────────────────────────────────

    /// All lines in stable insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.ledger.lines()
    }

    /// The full ledger, for consumers that render from it directly.
    #[must_use]
    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    /// The line matching the key, if present.
    #[must_use]
    pub fn find_line(&self, key: &LineKey) -> Option<&CartLine> {
        self.ledger.find(key)
    }

    /// Total units across all lines, recomputed on every call.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.ledger.total_items()
    }

    /// Total cart value, recomputed on every call.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.ledger.total_price()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Monotonic change counter. Two equal revisions mean the cart has not
    /// changed in between; useful for cheap render-skipping.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Shop Grouping ───────────────────────────────────────────────

    /// Partition the cart by owning shop, one group per distinct shop in
    /// first-occurrence order, each with its own subtotal.
    #[must_use]
    pub fn shop_groups(&self) -> Vec<ShopGroup<'_>> {
        self.grouping_service.group_by_shop(self.ledger.lines())
    }

    // ── Change Notifications ────────────────────────────────────────

    /// Register a listener invoked after every cart change, with the
    /// post-mutation ledger. Returns a handle for [`Self::unsubscribe`].
    pub fn subscribe(&mut self, listener: impl Fn(&CartLedger) + 'static) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a previously registered listener. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    // ── Checkout ────────────────────────────────────────────────────

    /// Build the order request for the current cart without submitting it.
    /// Lets the UI show the exact outbound totals before the user confirms.
    pub fn build_order_request(&self, form: &CheckoutForm) -> Result<OrderDraft, CartError> {
        let groups = self.shop_groups();
        self.checkout_service
            .build_order_request(&groups, form, &self.settings)
    }

    /// Assemble and submit the order for the current cart.
    ///
    /// On success the cart is cleared (and the empty state persisted) and
    /// the created order is returned. On failure the cart is left exactly
    /// as it was, so the user can retry without rebuilding it; a retry with
    /// an unchanged cart and form reuses the same idempotency key, so the
    /// backend can drop duplicates from a timed-out first attempt.
    pub async fn checkout(&mut self, form: &CheckoutForm) -> Result<PlacedOrder, CartError> {
        let draft = match self.build_order_request(form) {
            Ok(draft) => draft,
            Err(e) => {
                self.pending_draft = None;
                return Err(e);
            }
        };

        // Retry of an identical payload keeps the previous request token.
        let draft = match self.pending_draft.take() {
            Some(previous) if previous.same_payload(&draft) => previous,
            _ => draft,
        };

        debug!(
            idempotency_key = %draft.idempotency_key,
            shops = draft.shop_orders.len(),
            "Submitting order"
        );

        self.submitting = true;
        let result = self.order_api.create_order(&draft).await;
        self.submitting = false;

        match result {
            Ok(order) => {
                self.clear_cart();
                Ok(order)
            }
            Err(e) => {
                self.pending_draft = Some(draft);
                Err(e)
            }
        }
    }

    /// Is a checkout submission currently in flight? The UI disables the
    /// submit action while this is set, which is what prevents duplicate
    /// submissions — there is no queueing of concurrent checkouts.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // ── Order Tracking ──────────────────────────────────────────────

    /// Fetch a placed order by its identifier, e.g. for the post-checkout
    /// confirmation page.
    pub async fn fetch_order(&self, order_id: &str) -> Result<PlacedOrder, CartError> {
        self.order_api.fetch_order(order_id).await
    }

    /// Fetch the order history of a customer.
    pub async fn fetch_customer_orders(
        &self,
        customer_id: &str,
    ) -> Result<Vec<PlacedOrder>, CartError> {
        self.order_api.fetch_customer_orders(customer_id).await
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Current checkout settings.
    #[must_use]
    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// Change the flat delivery fee applied to delivery orders.
    pub fn set_delivery_fee(&mut self, fee: f64) -> Result<(), CartError> {
        if !fee.is_finite() || fee < 0.0 {
            return Err(CartError::ValidationError(format!(
                "Invalid delivery fee {fee}: must be finite and non-negative"
            )));
        }
        self.settings.delivery_fee = fee;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        slot: Box<dyn CartSlot>,
        order_api: Box<dyn OrderApi>,
        settings: CheckoutSettings,
    ) -> Self {
        let ledger = StorageManager::hydrate(slot.as_ref());
        Self {
            ledger,
            settings,
            grouping_service: GroupingService::new(),
            checkout_service: CheckoutService::new(),
            slot,
            order_api,
            listeners: Vec::new(),
            next_listener_id: 0,
            pending_draft: None,
            submitting: false,
            revision: 0,
        }
    }

    /// Runs after every ledger change: bump the revision, drop any retained
    /// draft (its payload no longer matches the cart), notify subscribers,
    /// then persist. Notification happens before persistence so observers
    /// always see the freshest state even if the write is slow or fails.
    fn after_mutation(&mut self) {
        self.revision += 1;
        self.pending_draft = None;
        for (_, listener) in &self.listeners {
            listener(&self.ledger);
        }
        StorageManager::persist(self.slot.as_mut(), &self.ledger);
    }
}
