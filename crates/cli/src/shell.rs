//! Interactive shell: reads commands, mutates the app state, renders pages.
//!
//! This is the renderer the storefront library deliberately does not
//! contain - pure presentation over [`AppState`]. Every command runs to
//! completion before the next is read, which is exactly the event model the
//! state layer assumes.

use std::io::{self, Write};

use vital_harvest_core::ProductId;
use vital_harvest_storefront::checkout::{BillingDetails, OrderDraft};
use vital_harvest_storefront::routes::Route;
use vital_harvest_storefront::{AppError, AppState, catalog};

/// Run the shell until `quit` or EOF.
pub fn run(state: &mut AppState) -> Result<(), Box<dyn std::error::Error>> {
    let mut shell = Shell { state, draft: None };

    println!("{}", shell.state.config().store_name);
    if let Some(session) = shell.state.auth().session() {
        println!("Welcome back, {}.", session.name);
    }
    println!("Type `help` for commands.\n");
    shell.render();

    loop {
        print!("vh> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !shell.execute(line) {
            break;
        }
    }

    Ok(())
}

struct Shell<'a> {
    state: &'a mut AppState,
    /// Order composed but not yet dispatched.
    draft: Option<OrderDraft>,
}

impl Shell<'_> {
    /// Execute one command line. Returns `false` to exit the shell.
    fn execute(&mut self, line: &str) -> bool {
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            return true;
        };
        let args: Vec<&str> = tokens.collect();

        match command {
            "help" => print_help(),
            "go" => self.go(&args),
            "open" => self.open(&args),
            "product" => self.product(&args),
            "add" => self.add(&args),
            "remove" => self.remove(&args),
            "qty" => self.qty(&args),
            "category" => print_category(&args),
            "cart" => self.render_cart(),
            "clearcart" => {
                self.state.cart_mut().clear();
                println!("Cart emptied.");
            }
            "register" => self.register(&args),
            "login" => self.login(&args),
            "logout" => {
                self.state.auth_mut().logout();
                println!("Logged out.");
            }
            "whoami" => match self.state.auth().session() {
                Some(session) => println!("{} <{}>", session.name, session.email),
                None => println!("Not logged in."),
            },
            "order" => self.order(line),
            "dispatch" => self.dispatch(&args),
            "quit" | "exit" => return false,
            other => println!("Unknown command `{other}`. Type `help`."),
        }

        true
    }

    fn go(&mut self, args: &[&str]) {
        let Some(page) = args.first() else {
            println!("Usage: go <home|shop|about|contact|checkout|auth|refund-policy|privacy-policy|terms>");
            return;
        };
        // Reuse the fragment grammar; `go shop` == `open #/shop`.
        self.state.navigate(Route::parse(&format!("#/{page}")));
        self.render();
    }

    fn open(&mut self, args: &[&str]) {
        let Some(fragment) = args.first() else {
            println!("Usage: open <fragment>, e.g. open #/product/3");
            return;
        };
        self.state.sync_location(fragment);
        self.render();
    }

    fn product(&mut self, args: &[&str]) {
        match parse_id(args) {
            Some(id) => {
                self.state.navigate(Route::Product(id));
                self.render();
            }
            None => println!("Usage: product <id>"),
        }
    }

    fn add(&mut self, args: &[&str]) {
        let Some(id) = parse_id(args) else {
            println!("Usage: add <id>");
            return;
        };
        match self.state.product(id) {
            Ok(product) => {
                self.state.cart_mut().add(product);
                println!(
                    "Added {}. Cart: {} item(s), {}.",
                    product.name,
                    self.state.cart().item_count(),
                    self.state.cart().subtotal(),
                );
            }
            Err(e) => println!("{}", e.message()),
        }
    }

    fn remove(&mut self, args: &[&str]) {
        match parse_id(args) {
            Some(id) => {
                self.state.cart_mut().remove(id);
                println!("Cart: {} item(s).", self.state.cart().item_count());
            }
            None => println!("Usage: remove <id>"),
        }
    }

    fn qty(&mut self, args: &[&str]) {
        let (Some(id), Some(quantity)) = (parse_id(args), args.get(1)) else {
            println!("Usage: qty <id> <quantity>");
            return;
        };
        match quantity.parse::<u32>() {
            Ok(quantity) => {
                self.state.cart_mut().set_quantity(id, quantity);
                println!("Cart: {} item(s).", self.state.cart().item_count());
            }
            Err(_) => println!("Quantity must be a non-negative integer."),
        }
    }

    fn register(&mut self, args: &[&str]) {
        let (Some(email), Some(password)) = (args.first(), args.get(1)) else {
            println!("Usage: register <email> <password> <name...>");
            return;
        };
        let name = args.get(2..).map_or(String::new(), |rest| rest.join(" "));
        if name.is_empty() {
            println!("Usage: register <email> <password> <name...>");
            return;
        }

        match self.state.auth_mut().register(&name, email, password) {
            Ok(session) => println!("Account created. Welcome, {}!", session.name),
            Err(e) => println!("{}", AppError::from(e).message()),
        }
    }

    fn login(&mut self, args: &[&str]) {
        let (Some(email), Some(password)) = (args.first(), args.get(1)) else {
            println!("Usage: login <email> <password>");
            return;
        };
        match self.state.auth_mut().login(email, password) {
            Ok(session) => println!("Welcome back, {}!", session.name),
            Err(e) => println!("{}", AppError::from(e).message()),
        }
    }

    fn order(&mut self, line: &str) {
        let rest = line.strip_prefix("order").unwrap_or(line).trim();
        let Some(billing) = parse_billing(rest) else {
            println!("Usage: order <name>; <phone>; <address>; <city>[; <notes>]");
            return;
        };

        match self.state.compose_order(billing) {
            Ok(draft) => {
                println!("\n{}\n", draft.message());
                println!("WhatsApp: {}", draft.whatsapp_url());
                println!("Email:    {}", draft.mailto_url());
                println!("Type `dispatch wa` or `dispatch email` to place the order.");
                self.draft = Some(draft);
            }
            Err(e) => println!("{}", e.message()),
        }
    }

    fn dispatch(&mut self, args: &[&str]) {
        let Some(draft) = self.draft.take() else {
            println!("Nothing to dispatch. Compose with `order` first.");
            return;
        };

        let url = match args.first() {
            Some(&"email") => draft.mailto_url().to_owned(),
            _ => draft.whatsapp_url().to_owned(),
        };
        println!("Opening {url}");

        let confirmation = self.state.dispatch_order(draft);
        println!("\nOrder placed. Thank you, {}!", confirmation.billing.name);
        for item in &confirmation.items {
            println!(
                "  {} (x{}) - {}",
                item.product.name,
                item.quantity,
                item.line_total()
            );
        }
        println!("  Total: {}", confirmation.total);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render(&mut self) {
        if self.state.router_mut().take_scroll_reset() {
            // A fresh page starts at the top.
            println!("{}", "-".repeat(60));
        }

        match self.state.router().current() {
            Route::Home => self.render_home(),
            Route::Shop => self.render_shop(),
            Route::Product(id) => self.render_product(id),
            Route::Checkout => self.render_checkout(),
            Route::Auth => self.render_auth(),
            Route::About => {
                println!("About {}", self.state.config().store_name);
                println!("Small-batch wellness staples, sourced in the north of Pakistan.");
            }
            Route::Contact => {
                println!("Contact us");
                println!("WhatsApp: {}", self.state.config().order_phone);
                println!("Email:    {}", self.state.config().order_email);
            }
            Route::RefundPolicy => {
                println!("Refund policy: unopened jars within 14 days, full refund.");
            }
            Route::PrivacyPolicy => {
                println!("Privacy policy: your details are used for order delivery only.");
            }
            Route::Terms => {
                println!("Terms of service: orders are confirmed over WhatsApp or email.");
            }
        }
    }

    fn render_home(&self) {
        println!("Home - {}", self.state.config().store_name);
        println!("Categories: {}", catalog::categories().join(", "));
        println!("Featured:");
        for product in catalog::all().iter().take(3) {
            println!("  [{}] {} - {}", product.id, product.name, product.price);
        }
        println!("Browse everything with `go shop`.");
    }

    fn render_shop(&self) {
        println!("Shop");
        for product in catalog::all() {
            let sale = product
                .original_price
                .map_or(String::new(), |was| format!(" (was {was})"));
            println!(
                "  [{}] {} - {}{}  [{}]",
                product.id, product.name, product.price, sale, product.category,
            );
        }
        println!("View details with `product <id>`, add with `add <id>`.");
    }

    fn render_product(&self, id: ProductId) {
        match self.state.product(id) {
            Ok(product) => {
                println!("{}  ({:.1}/5)", product.name, product.rating);
                println!("{}", product.price);
                println!("\n{}\n", product.description);
                for benefit in &product.benefits {
                    println!("  * {benefit}");
                }
            }
            Err(_) => {
                println!("That product could not be found.");
                println!("Back to the shop: `go shop`");
            }
        }
    }

    fn render_cart(&self) {
        if self.state.cart().is_empty() {
            println!("Your cart is empty.");
            return;
        }
        for item in self.state.cart().items() {
            println!(
                "  [{}] {} (x{}) - {}",
                item.product.id,
                item.product.name,
                item.quantity,
                item.line_total()
            );
        }
        println!(
            "  {} item(s), subtotal {}",
            self.state.cart().item_count(),
            self.state.cart().subtotal()
        );
    }

    fn render_checkout(&self) {
        if let Some(confirmation) = self.state.last_order() {
            println!("Order confirmed at {}.", confirmation.placed_at);
            println!("Total: {}", confirmation.total);
            return;
        }

        println!("Checkout");
        self.render_cart();
        if !self.state.cart().is_empty() {
            println!("Place your order with `order <name>; <phone>; <address>; <city>`.");
        }
    }

    fn render_auth(&self) {
        match self.state.auth().session() {
            Some(session) => println!("Logged in as {} <{}>.", session.name, session.email),
            None => {
                println!("Log in:   login <email> <password>");
                println!("Register: register <email> <password> <name...>");
            }
        }
    }
}

/// Render one category's products, or list the categories.
fn print_category(args: &[&str]) {
    let Some(name) = args.first() else {
        println!("Categories: {}", catalog::categories().join(", "));
        return;
    };

    let products = catalog::by_category(name);
    if products.is_empty() {
        println!(
            "No products in `{name}`. Categories: {}",
            catalog::categories().join(", ")
        );
        return;
    }
    for product in products {
        println!("  [{}] {} - {}", product.id, product.name, product.price);
    }
}

fn parse_id(args: &[&str]) -> Option<ProductId> {
    let id: i32 = args.first()?.parse().ok()?;
    Some(ProductId::new(id))
}

/// Parse `name; phone; address; city[; notes]`.
fn parse_billing(input: &str) -> Option<BillingDetails> {
    let mut fields = input.split(';').map(str::trim);
    let name = fields.next().filter(|s| !s.is_empty())?;
    let phone = fields.next().filter(|s| !s.is_empty())?;
    let address = fields.next().filter(|s| !s.is_empty())?;
    let city = fields.next().filter(|s| !s.is_empty())?;
    let notes = fields.next().filter(|s| !s.is_empty());

    Some(BillingDetails {
        name: name.to_owned(),
        phone: phone.to_owned(),
        address: address.to_owned(),
        city: city.to_owned(),
        notes: notes.map(str::to_owned),
    })
}

fn print_help() {
    println!("Pages:    go <page> | open <fragment> | product <id> | category [name]");
    println!("Cart:     add <id> | remove <id> | qty <id> <n> | cart | clearcart");
    println!("Account:  register <email> <password> <name...> | login <email> <password>");
    println!("          logout | whoami");
    println!("Checkout: order <name>; <phone>; <address>; <city>[; <notes>]");
    println!("          dispatch [wa|email]");
    println!("Exit:     quit");
}
