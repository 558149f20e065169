//! Deferred wiring example for capability-registry.
//!
//! Demonstrates:
//! - Declaring capabilities with `capability!`
//! - Consumers that initialise before their producers, using `get_after_register()`
//! - First-registration-wins semantics
//! - Handling a missing capability with `get()`
//!
//! Run with: `RUST_LOG=debug cargo run --example deferred_wiring`

use capability_registry::{capability, define_registry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Create an isolated registry for this example
define_registry!(app);

trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

trait Mailer: Send + Sync {
    fn send(&self, to: &str, body: &str);
}

trait Metrics: Send + Sync {}

capability!(dyn Logger, dyn Mailer, dyn Metrics);

struct ConsoleLogger {
    prefix: &'static str,
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        println!("   [{}] {}", self.prefix, message);
    }
}

struct SmtpMailer {
    logger: Arc<dyn Logger>,
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, body: &str) {
        self.logger.log(&format!("mail to {to}: {body}"));
    }
}

// Each "component" initialises itself without knowing the order of the others.

fn init_mailer() {
    app::get_after_register::<dyn Logger, _>(|logger| {
        logger.log("mailer found its logger");
        app::register::<dyn Mailer>(Arc::new(SmtpMailer { logger }));
    });
}

fn init_signup() {
    app::get_after_register::<dyn Mailer, _>(|mailer| {
        mailer.send("new-user@example.com", "welcome aboard");
    });
}

fn init_logging() {
    app::register::<dyn Logger>(Arc::new(ConsoleLogger { prefix: "primary" }));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== capability-registry: Deferred Wiring ===\n");

    // -------------------------------------------------------------------------
    // 1. Consumers first
    // -------------------------------------------------------------------------
    println!("1. Initialising consumers before any producer...");

    init_signup();
    init_mailer();

    println!(
        "   pending: Logger={}, Mailer={}",
        app::pending_callbacks::<dyn Logger>(),
        app::pending_callbacks::<dyn Mailer>()
    );

    // -------------------------------------------------------------------------
    // 2. Producer arrives; queued callbacks run inside register()
    // -------------------------------------------------------------------------
    println!("\n2. Registering the logger...");

    init_logging();

    // -------------------------------------------------------------------------
    // 3. Later registrations are ignored
    // -------------------------------------------------------------------------
    println!("\n3. Registering a second logger (ignored)...");

    app::register::<dyn Logger>(Arc::new(ConsoleLogger { prefix: "secondary" }));
    app::require::<dyn Logger>().log("still the first logger");

    // -------------------------------------------------------------------------
    // 4. Missing capabilities
    // -------------------------------------------------------------------------
    println!("\n4. Looking up a capability nobody registered...");

    match app::get::<dyn Metrics>() {
        Ok(_) => println!("   Found Metrics"),
        Err(e) => println!("   Error (expected): {}", e),
    }

    println!("\n=== Example Complete ===");
}
