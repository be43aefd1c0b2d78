//! # Seed Data
//!
//! Populates a [`MemoryStore`] with a deterministic demo dataset.
//!
//! ## Usage
//! ```rust,ignore
//! let store = MemoryStore::new();
//! let counts = seed_demo(&store)?;
//! info!(products = counts.products, "Demo data ready");
//! ```
//!
//! ## Generated Dataset
//! Two storefronts with contrasting setups:
//! - **Empório Central** (`emporio-central`) - grocery; fixed-fee delivery
//!   and counter pickup, both enabled; Pix key configured
//! - **Padaria do Bairro** (`padaria-do-bairro`) - bakery; delivery entry
//!   configured but disabled (pickup only), negotiated fees
//!
//! Plus:
//! - Users in all three roles (admin, two store owners, two customers)
//! - Categories and weight-priced products, one deactivated catalog entry
//!   and one uncategorized one
//! - Platform payment methods (Pix, cash, cards)
//! - Orders spread over today, recent days, previous months and the
//!   previous year, so every report window has data, including one
//!   cancelled order that revenue must ignore
//!
//! IDs are fixed strings, so seeding twice rejects duplicates. Seed a
//! fresh store per process (or per test).

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use tenantflow_core::{
    Category, DeliveryDetails, DeliveryMethod, DeliveryOption, FeeType, Money, Order, OrderItem,
    OrderStatus, PaymentMethodRecord, PaymentStatus, Product, ProductUnit, Quantity, Role,
    SocialLinks, Store, User,
};

use crate::error::{StoreError, StoreResult};
use crate::memory::{MemoryStore, StoreCounts};

const STORE_EMPORIO: &str = "store-emporio";
const STORE_PADARIA: &str = "store-padaria";

/// Platform payment methods: (id, name).
const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("pm-pix", "Pix"),
    ("pm-dinheiro", "Dinheiro"),
    ("pm-cartao-credito", "Cartão de Crédito"),
    ("pm-cartao-debito", "Cartão de Débito"),
];

/// Accounts: (id, name, email, role, owned store).
const USERS: &[(&str, &str, &str, Role, Option<&str>)] = &[
    ("user-admin", "Ana Admin", "ana@tenantflow.dev", Role::Admin, None),
    (
        "user-carlos",
        "Carlos Moreira",
        "carlos@emporiocentral.com.br",
        Role::Lojista,
        Some(STORE_EMPORIO),
    ),
    (
        "user-helena",
        "Helena Duarte",
        "helena@padariadobairro.com.br",
        Role::Lojista,
        Some(STORE_PADARIA),
    ),
    ("user-maria", "Maria Silva", "maria@example.com", Role::Cliente, None),
    ("user-joao", "João Pereira", "joao@example.com", Role::Cliente, None),
];

/// Categories: (id, store, name).
const CATEGORIES: &[(&str, &str, &str)] = &[
    ("cat-ec-carnes", STORE_EMPORIO, "Carnes"),
    ("cat-ec-hortifruti", STORE_EMPORIO, "Hortifrúti"),
    ("cat-ec-bebidas", STORE_EMPORIO, "Bebidas"),
    ("cat-ec-mercearia", STORE_EMPORIO, "Mercearia"),
    ("cat-pb-paes", STORE_PADARIA, "Pães"),
    ("cat-pb-doces", STORE_PADARIA, "Doces"),
    ("cat-pb-salgados", STORE_PADARIA, "Salgados"),
];

/// Catalog rows: (id, store, category, name, price cents, unit, stock millis, active).
#[rustfmt::skip]
const PRODUCTS: &[(&str, &str, Option<&str>, &str, i64, ProductUnit, i64, bool)] = &[
    ("prod-ec-picanha",  STORE_EMPORIO, Some("cat-ec-carnes"),     "Picanha Bovina",          7999, ProductUnit::Kilogram, 42_000,  true),
    ("prod-ec-linguica", STORE_EMPORIO, Some("cat-ec-carnes"),     "Linguiça Toscana",        2899, ProductUnit::Kilogram, 30_000,  true),
    ("prod-ec-frango",   STORE_EMPORIO, Some("cat-ec-carnes"),     "Peito de Frango",         1999, ProductUnit::Kilogram, 55_000,  true),
    ("prod-ec-tomate",   STORE_EMPORIO, Some("cat-ec-hortifruti"), "Tomate Italiano",          899, ProductUnit::Kilogram, 80_000,  true),
    ("prod-ec-banana",   STORE_EMPORIO, Some("cat-ec-hortifruti"), "Banana Prata",             649, ProductUnit::Kilogram, 120_000, true),
    ("prod-ec-alface",   STORE_EMPORIO, Some("cat-ec-hortifruti"), "Alface Crespa",            399, ProductUnit::Unit,     40_000,  true),
    ("prod-ec-cerveja",  STORE_EMPORIO, Some("cat-ec-bebidas"),    "Cerveja Pilsen 350ml",     499, ProductUnit::Unit,     240_000, true),
    ("prod-ec-suco",     STORE_EMPORIO, Some("cat-ec-bebidas"),    "Suco de Laranja 1L",      1299, ProductUnit::Unit,     60_000,  true),
    ("prod-ec-arroz",    STORE_EMPORIO, Some("cat-ec-mercearia"),  "Arroz Branco 5kg",        2490, ProductUnit::Unit,     90_000,  true),
    ("prod-ec-cafe",     STORE_EMPORIO, Some("cat-ec-mercearia"),  "Café Torrado 500g",       1890, ProductUnit::Unit,     70_000,  true),
    ("prod-ec-azeite",   STORE_EMPORIO, Some("cat-ec-mercearia"),  "Azeite Extravirgem 500ml", 3990, ProductUnit::Unit,    10_000,  false),
    ("prod-ec-gelo",     STORE_EMPORIO, None,                      "Gelo em Cubos 2kg",        700, ProductUnit::Unit,     50_000,  true),
    ("prod-pb-frances",  STORE_PADARIA, Some("cat-pb-paes"),       "Pão Francês",             1590, ProductUnit::Kilogram, 25_000,  true),
    ("prod-pb-integral", STORE_PADARIA, Some("cat-pb-paes"),       "Pão Integral",            1290, ProductUnit::Unit,     30_000,  true),
    ("prod-pb-sonho",    STORE_PADARIA, Some("cat-pb-doces"),      "Sonho de Creme",           650, ProductUnit::Unit,     40_000,  true),
    ("prod-pb-bolo",     STORE_PADARIA, Some("cat-pb-doces"),      "Bolo de Cenoura",         3200, ProductUnit::Unit,     12_000,  true),
    ("prod-pb-coxinha",  STORE_PADARIA, Some("cat-pb-salgados"),   "Coxinha de Frango",        750, ProductUnit::Unit,     60_000,  true),
    ("prod-pb-queijo",   STORE_PADARIA, Some("cat-pb-salgados"),   "Pão de Queijo",           2190, ProductUnit::Kilogram, 20_000,  true),
    ("prod-pb-torta",    STORE_PADARIA, Some("cat-pb-salgados"),   "Torta de Frango",         4590, ProductUnit::Unit,     8_000,   true),
];

/// One historical order to build.
struct OrderSeed {
    id: &'static str,
    store_id: &'static str,
    customer_id: Option<&'static str>,
    customer_name: &'static str,
    days_ago: i64,
    payment_method: &'static str,
    delivery_method: DeliveryMethod,
    address: Option<&'static str>,
    reference: Option<&'static str>,
    fee_cents: i64,
    status: OrderStatus,
    payment_status: PaymentStatus,
    observations: Option<&'static str>,
    /// Lines as (product id, quantity millis).
    lines: &'static [(&'static str, i64)],
}

/// Order history across today, recent days, previous months and the
/// previous year. Fees are frozen as they were charged.
const ORDERS: &[OrderSeed] = &[
    OrderSeed {
        id: "order-1001",
        store_id: STORE_EMPORIO,
        customer_id: Some("user-maria"),
        customer_name: "Maria Silva",
        days_ago: 0,
        payment_method: "Pix",
        delivery_method: DeliveryMethod::Delivery,
        address: Some("Rua das Acácias, 45 - Centro"),
        reference: Some("portão azul"),
        fee_cents: 800,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        observations: Some("Entregar depois das 18h"),
        lines: &[("prod-ec-picanha", 1_500), ("prod-ec-cerveja", 12_000)],
    },
    OrderSeed {
        id: "order-1002",
        store_id: STORE_PADARIA,
        customer_id: Some("user-joao"),
        customer_name: "João Pereira",
        days_ago: 0,
        payment_method: "Dinheiro",
        delivery_method: DeliveryMethod::Pickup,
        address: None,
        reference: None,
        fee_cents: 0,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        observations: None,
        lines: &[("prod-pb-frances", 500), ("prod-pb-sonho", 3_000)],
    },
    OrderSeed {
        id: "order-1003",
        store_id: STORE_EMPORIO,
        customer_id: None,
        customer_name: "Dona Cleusa",
        days_ago: 1,
        payment_method: "Dinheiro",
        delivery_method: DeliveryMethod::Pickup,
        address: None,
        reference: None,
        fee_cents: 0,
        status: OrderStatus::Processing,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[("prod-ec-frango", 2_000), ("prod-ec-arroz", 1_000)],
    },
    OrderSeed {
        id: "order-1004",
        store_id: STORE_EMPORIO,
        customer_id: Some("user-maria"),
        customer_name: "Maria Silva",
        days_ago: 2,
        payment_method: "Cartão de Crédito",
        delivery_method: DeliveryMethod::Delivery,
        address: Some("Rua das Acácias, 45 - Centro"),
        reference: Some("portão azul"),
        fee_cents: 800,
        status: OrderStatus::Shipped,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[
            ("prod-ec-tomate", 1_200),
            ("prod-ec-alface", 2_000),
            ("prod-ec-suco", 2_000),
        ],
    },
    OrderSeed {
        id: "order-1005",
        store_id: STORE_PADARIA,
        customer_id: Some("user-maria"),
        customer_name: "Maria Silva",
        days_ago: 3,
        payment_method: "Pix",
        delivery_method: DeliveryMethod::Pickup,
        address: None,
        reference: None,
        fee_cents: 0,
        status: OrderStatus::Cancelled,
        payment_status: PaymentStatus::Rejected,
        observations: Some("Cliente desistiu da encomenda"),
        lines: &[("prod-pb-bolo", 1_000)],
    },
    OrderSeed {
        id: "order-1006",
        store_id: STORE_EMPORIO,
        customer_id: Some("user-joao"),
        customer_name: "João Pereira",
        days_ago: 4,
        payment_method: "Pix",
        delivery_method: DeliveryMethod::Delivery,
        address: Some("Av. Brasil, 1200 apto 32"),
        reference: None,
        fee_cents: 800,
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[("prod-ec-picanha", 2_000), ("prod-ec-linguica", 1_500)],
    },
    OrderSeed {
        id: "order-1007",
        store_id: STORE_PADARIA,
        customer_id: None,
        customer_name: "Seu Antônio",
        days_ago: 6,
        payment_method: "Dinheiro",
        delivery_method: DeliveryMethod::Pickup,
        address: None,
        reference: None,
        fee_cents: 0,
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[("prod-pb-coxinha", 6_000), ("prod-pb-queijo", 800)],
    },
    OrderSeed {
        id: "order-1008",
        store_id: STORE_EMPORIO,
        customer_id: Some("user-maria"),
        customer_name: "Maria Silva",
        days_ago: 9,
        payment_method: "Pix",
        delivery_method: DeliveryMethod::Pickup,
        address: None,
        reference: None,
        fee_cents: 0,
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[("prod-ec-cafe", 2_000), ("prod-ec-arroz", 1_000)],
    },
    OrderSeed {
        id: "order-1009",
        store_id: STORE_EMPORIO,
        customer_id: Some("user-joao"),
        customer_name: "João Pereira",
        days_ago: 33,
        payment_method: "Cartão de Crédito",
        delivery_method: DeliveryMethod::Delivery,
        address: Some("Av. Brasil, 1200 apto 32"),
        reference: None,
        fee_cents: 800,
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[("prod-ec-frango", 3_000), ("prod-ec-suco", 4_000)],
    },
    OrderSeed {
        id: "order-1010",
        store_id: STORE_PADARIA,
        customer_id: Some("user-maria"),
        customer_name: "Maria Silva",
        days_ago: 38,
        payment_method: "Pix",
        delivery_method: DeliveryMethod::Pickup,
        address: None,
        reference: None,
        fee_cents: 0,
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[("prod-pb-frances", 1_200), ("prod-pb-coxinha", 4_000)],
    },
    OrderSeed {
        id: "order-1011",
        store_id: STORE_EMPORIO,
        customer_id: None,
        customer_name: "Dona Cleusa",
        days_ago: 65,
        payment_method: "Dinheiro",
        delivery_method: DeliveryMethod::Pickup,
        address: None,
        reference: None,
        fee_cents: 0,
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[("prod-ec-cerveja", 24_000), ("prod-ec-linguica", 2_000)],
    },
    OrderSeed {
        id: "order-1012",
        store_id: STORE_EMPORIO,
        customer_id: Some("user-maria"),
        customer_name: "Maria Silva",
        days_ago: 370,
        payment_method: "Pix",
        delivery_method: DeliveryMethod::Delivery,
        address: Some("Rua das Acácias, 45 - Centro"),
        reference: Some("portão azul"),
        fee_cents: 800,
        status: OrderStatus::Delivered,
        payment_status: PaymentStatus::Paid,
        observations: None,
        lines: &[("prod-ec-picanha", 1_000), ("prod-ec-cafe", 1_000)],
    },
];

/// Seeds the demo dataset into an empty store.
///
/// ## Returns
/// * `Ok(StoreCounts)` - What the store now holds
/// * `Err(StoreError::Duplicate)` - The store was already seeded
pub fn seed_demo(store: &MemoryStore) -> StoreResult<StoreCounts> {
    let now = Utc::now();

    for (id, name) in PAYMENT_METHODS {
        store.payment_methods().insert(PaymentMethodRecord {
            id: (*id).to_string(),
            name: (*name).to_string(),
            is_active: true,
        })?;
    }

    for (id, name, email, role, store_id) in USERS {
        store.users().insert(User {
            id: (*id).to_string(),
            name: (*name).to_string(),
            email: (*email).to_string(),
            role: *role,
            store_id: store_id.map(str::to_string),
            created_at: now - Duration::days(400),
        })?;
    }

    for record in demo_stores(now) {
        store.stores().insert(record)?;
    }

    for (id, store_id, name) in CATEGORIES {
        store.categories().insert(Category {
            id: (*id).to_string(),
            store_id: (*store_id).to_string(),
            name: (*name).to_string(),
            created_at: now - Duration::days(390),
        })?;
    }

    for (id, store_id, category_id, name, price_cents, unit, stock_millis, active) in PRODUCTS {
        store.products().insert(Product {
            id: (*id).to_string(),
            store_id: (*store_id).to_string(),
            category_id: category_id.map(str::to_string),
            name: (*name).to_string(),
            description: None,
            price_cents: *price_cents,
            unit: *unit,
            stock_millis: *stock_millis,
            image_url: None,
            is_active: *active,
            created_at: now - Duration::days(380),
            updated_at: now - Duration::days(380),
        })?;
    }

    for (index, seed) in ORDERS.iter().enumerate() {
        let order = build_order(store, seed, index, now)?;
        store.orders().append(order)?;
    }

    let counts = store.counts();
    info!(
        stores = counts.stores,
        products = counts.products,
        orders = counts.orders,
        users = counts.users,
        "Seeded demo dataset"
    );
    Ok(counts)
}

/// The two demo storefronts.
fn demo_stores(now: DateTime<Utc>) -> Vec<Store> {
    vec![
        Store {
            id: STORE_EMPORIO.to_string(),
            owner_id: "user-carlos".to_string(),
            name: "Empório Central".to_string(),
            slug: "emporio-central".to_string(),
            description: Some("Mercearia completa no centro da cidade".to_string()),
            logo_url: None,
            phone: Some("+55 11 91234-5678".to_string()),
            delivery_options: vec![
                DeliveryOption {
                    method: DeliveryMethod::Pickup,
                    enabled: true,
                    fee_type: FeeType::Fixed,
                    fee_cents: 0,
                    details: Some("Retirada no balcão em 30 minutos".to_string()),
                },
                DeliveryOption {
                    method: DeliveryMethod::Delivery,
                    enabled: true,
                    fee_type: FeeType::Fixed,
                    fee_cents: 800,
                    details: Some("Entrega em até 2h no centro".to_string()),
                },
            ],
            payment_method_ids: vec![
                "pm-pix".to_string(),
                "pm-dinheiro".to_string(),
                "pm-cartao-credito".to_string(),
            ],
            pix_key: Some("11912345678".to_string()),
            social: SocialLinks {
                instagram: Some("@emporiocentral".to_string()),
                facebook: None,
            },
            is_active: true,
            created_at: now - Duration::days(400),
            updated_at: now - Duration::days(30),
        },
        // No Pickup entry on purpose: pickup needs no configuration.
        // The delivery entry stays configured but disabled.
        Store {
            id: STORE_PADARIA.to_string(),
            owner_id: "user-helena".to_string(),
            name: "Padaria do Bairro".to_string(),
            slug: "padaria-do-bairro".to_string(),
            description: Some("Pães quentinhos três vezes ao dia".to_string()),
            logo_url: None,
            phone: Some("+55 11 99876-5432".to_string()),
            delivery_options: vec![DeliveryOption {
                method: DeliveryMethod::Delivery,
                enabled: false,
                fee_type: FeeType::Variable,
                fee_cents: 0,
                details: Some("Combinar entrega pelo WhatsApp".to_string()),
            }],
            payment_method_ids: vec!["pm-pix".to_string(), "pm-dinheiro".to_string()],
            pix_key: Some("padaria@dobairro.com.br".to_string()),
            social: SocialLinks {
                instagram: Some("@padariadobairro".to_string()),
                facebook: Some("padariadobairro".to_string()),
            },
            is_active: true,
            created_at: now - Duration::days(400),
            updated_at: now - Duration::days(400),
        },
    ]
}

/// Builds one historical order, snapshotting the referenced products.
fn build_order(
    store: &MemoryStore,
    seed: &OrderSeed,
    index: usize,
    now: DateTime<Utc>,
) -> StoreResult<Order> {
    let mut items = Vec::with_capacity(seed.lines.len());
    let mut subtotal = Money::zero();

    for (product_id, quantity_millis) in seed.lines {
        let product = store.products().get_by_id(product_id).ok_or_else(|| {
            StoreError::invalid(format!(
                "order {} references unknown product {product_id}",
                seed.id
            ))
        })?;

        let quantity = Quantity::from_millis(*quantity_millis);
        let line_total = product.price().multiply_quantity(quantity);
        subtotal += line_total;

        items.push(OrderItem {
            product_id: product.id,
            name_snapshot: product.name,
            unit: product.unit,
            unit_price_cents: product.price_cents,
            quantity_millis: *quantity_millis,
            line_total_cents: line_total.cents(),
        });
    }

    // Distinct timestamps keep newest-first listings stable.
    let placed = now - Duration::days(seed.days_ago) - Duration::minutes(index as i64 * 7);
    let version = implied_version(seed.status, seed.payment_status);
    let updated_at = placed + Duration::hours(version);

    Ok(Order {
        id: seed.id.to_string(),
        store_id: seed.store_id.to_string(),
        customer_id: seed.customer_id.map(str::to_string),
        customer_name: seed.customer_name.to_string(),
        items,
        status: seed.status,
        payment_status: seed.payment_status,
        payment_method: seed.payment_method.to_string(),
        delivery: DeliveryDetails {
            method: seed.delivery_method,
            address: seed.address.map(str::to_string),
            reference: seed.reference.map(str::to_string),
            fee_cents: seed.fee_cents,
        },
        observations: seed.observations.map(str::to_string),
        subtotal_cents: subtotal.cents(),
        total_cents: subtotal.cents() + seed.fee_cents,
        created_at: placed,
        updated_at,
        version,
    })
}

/// How many status updates an order in this state has been through.
fn implied_version(status: OrderStatus, payment_status: PaymentStatus) -> i64 {
    let status_steps = match status {
        OrderStatus::Pending => 0,
        OrderStatus::Processing | OrderStatus::Cancelled => 1,
        OrderStatus::Shipped => 2,
        OrderStatus::Delivered => 3,
    };
    let payment_steps = match payment_status {
        PaymentStatus::Pending => 0,
        PaymentStatus::Paid | PaymentStatus::Rejected => 1,
    };
    status_steps + payment_steps
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts() {
        let store = MemoryStore::new();
        let counts = seed_demo(&store).unwrap();

        assert_eq!(counts.stores, 2);
        assert_eq!(counts.users, 5);
        assert_eq!(counts.payment_methods, 4);
        assert_eq!(counts.categories, 7);
        assert_eq!(counts.products, PRODUCTS.len());
        assert_eq!(counts.orders, ORDERS.len());
    }

    #[test]
    fn test_seed_twice_rejected() {
        let store = MemoryStore::new();
        seed_demo(&store).unwrap();

        let err = seed_demo(&store).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[test]
    fn test_stores_resolve_by_slug() {
        let store = MemoryStore::new();
        seed_demo(&store).unwrap();

        let emporio = store.stores().find_by_slug("emporio-central").unwrap();
        assert!(emporio.offers(DeliveryMethod::Delivery));
        assert!(emporio.offers(DeliveryMethod::Pickup));

        // Configured-but-disabled delivery, pickup by default.
        let padaria = store.stores().find_by_slug("padaria-do-bairro").unwrap();
        assert!(!padaria.offers(DeliveryMethod::Delivery));
        assert!(padaria.delivery_option(DeliveryMethod::Delivery).is_some());
        assert!(padaria.offers(DeliveryMethod::Pickup));
    }

    #[test]
    fn test_order_totals_add_up() {
        let store = MemoryStore::new();
        seed_demo(&store).unwrap();

        // 1.5 kg picanha: 7999 × 1.5 = 11998.5 → 11999 (half up)
        // 12 cervejas: 499 × 12 = 5988
        let order = store.orders().get_by_id("order-1001").unwrap();
        assert_eq!(order.subtotal_cents, 11_999 + 5_988);
        assert_eq!(order.total_cents, order.subtotal_cents + 800);
        assert_eq!(order.delivery.fee_cents, 800);
    }

    #[test]
    fn test_order_lines_snapshot_catalog() {
        let store = MemoryStore::new();
        seed_demo(&store).unwrap();

        let order = store.orders().get_by_id("order-1002").unwrap();
        let names: Vec<&str> = order
            .items
            .iter()
            .map(|i| i.name_snapshot.as_str())
            .collect();
        assert_eq!(names, vec!["Pão Francês", "Sonho de Creme"]);
    }

    #[test]
    fn test_history_spans_report_windows() {
        let store = MemoryStore::new();
        seed_demo(&store).unwrap();
        let now = Utc::now();

        let orders = store.orders().list_by_store(STORE_EMPORIO);
        let week = orders
            .iter()
            .filter(|o| o.created_at > now - Duration::days(7))
            .count();
        let older_than_month = orders
            .iter()
            .filter(|o| o.created_at < now - Duration::days(31))
            .count();
        let previous_year = orders
            .iter()
            .filter(|o| o.created_at < now - Duration::days(360))
            .count();

        assert!(week >= 3);
        assert!(older_than_month >= 2);
        assert!(previous_year >= 1);
    }

    #[test]
    fn test_cancelled_order_present_for_report_exclusion() {
        let store = MemoryStore::new();
        seed_demo(&store).unwrap();

        let cancelled = store.orders().get_by_id("order-1005").unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert!(!cancelled.counts_for_reports());
    }

    #[test]
    fn test_inactive_product_hidden_from_storefront() {
        let store = MemoryStore::new();
        seed_demo(&store).unwrap();

        let listed = store.products().list_by_store(STORE_EMPORIO);
        assert!(listed.iter().all(|p| p.id != "prod-ec-azeite"));
        assert!(store.products().get_by_id("prod-ec-azeite").is_some());
    }
}
