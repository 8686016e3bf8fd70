//! `oceanview` - command-line front desk for the Oceanview reservation service

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use oceanview_client::{ClientConfig, NetworkGateway, ReservationGateway, logger};
use shared::pricing::format_currency;
use shared::report::{RECENT_LIMIT, ReservationReport};
use shared::{
    Reservation, ReservationLifecycle, ReservationRequest, ReservationStatus, RoomCategory,
    StayCalculator, StayPeriod,
};

#[derive(Parser)]
#[command(name = "oceanview")]
#[command(about = "Front desk for the Oceanview reservation service")]
struct CommandLine {
    /// API base URL, `/api` included
    #[arg(long, global = true, env = "OCEANVIEW_API_URL")]
    api_url: Option<String>,

    /// Log in before running the command
    #[arg(long, global = true, env = "OCEANVIEW_USERNAME")]
    username: Option<String>,

    #[arg(long, global = true, env = "OCEANVIEW_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a stay without booking it
    #[command(alias = "q")]
    Quote {
        #[arg(long)]
        room: RoomCategory,
        #[arg(long)]
        check_in: NaiveDate,
        #[arg(long)]
        check_out: NaiveDate,
        /// Guest count as typed; anything unreadable counts as 1
        #[arg(long, default_value = "1")]
        guests: String,
    },
    /// Log in and print the issued token
    Login,
    /// Print the usage guide published by the service
    Guide,
    /// List all reservations
    #[command(alias = "ls")]
    List,
    /// Show one reservation and the actions it allows
    Show { reservation_number: String },
    /// Search reservations by guest name
    Search { name: String },
    /// Create a reservation
    Book(BookArgs),
    /// Change a CONFIRMED reservation; only the given fields change
    Edit(EditArgs),
    /// Check a guest in
    CheckIn { reservation_number: String },
    /// Check a guest out
    CheckOut { reservation_number: String },
    /// Cancel a reservation
    Cancel { reservation_number: String },
    /// Mark a reservation as a no-show
    NoShow { reservation_number: String },
    /// Booking counts and revenue by room category
    Report {
        #[arg(long, default_value_t = RECENT_LIMIT)]
        limit: usize,
    },
}

#[derive(clap::Args)]
struct BookArgs {
    #[arg(long)]
    guest_name: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    contact_number: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    room: RoomCategory,
    #[arg(long)]
    check_in: NaiveDate,
    #[arg(long)]
    check_out: NaiveDate,
    /// Sent as given; the service accepts 1 to 10
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    guests: i32,
    #[arg(long)]
    special_requests: Option<String>,
    /// Submit as a guest self-booking, no login needed
    #[arg(long)]
    public: bool,
}

impl BookArgs {
    fn to_request(&self) -> ReservationRequest {
        ReservationRequest {
            guest_name: self.guest_name.clone(),
            address: self.address.clone(),
            contact_number: self.contact_number.clone(),
            email: self.email.clone(),
            room_type: self.room,
            check_in_date: self.check_in,
            check_out_date: self.check_out,
            number_of_guests: self.guests,
            special_requests: self.special_requests.clone(),
        }
    }
}

#[derive(clap::Args)]
struct EditArgs {
    reservation_number: String,
    #[arg(long)]
    guest_name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    contact_number: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    room: Option<RoomCategory>,
    #[arg(long)]
    check_in: Option<NaiveDate>,
    #[arg(long)]
    check_out: Option<NaiveDate>,
    #[arg(long, allow_negative_numbers = true)]
    guests: Option<i32>,
    #[arg(long)]
    special_requests: Option<String>,
}

impl EditArgs {
    fn apply(&self, request: &mut ReservationRequest) {
        if let Some(name) = &self.guest_name {
            request.guest_name = name.clone();
        }
        if let Some(address) = &self.address {
            request.address = address.clone();
        }
        if let Some(number) = &self.contact_number {
            request.contact_number = number.clone();
        }
        if let Some(email) = &self.email {
            request.email = Some(email.clone());
        }
        if let Some(room) = self.room {
            request.room_type = room;
        }
        if let Some(check_in) = self.check_in {
            request.check_in_date = check_in;
        }
        if let Some(check_out) = self.check_out {
            request.check_out_date = check_out;
        }
        if let Some(guests) = self.guests {
            request.number_of_guests = guests;
        }
        if let Some(requests) = &self.special_requests {
            request.special_requests = Some(requests.clone());
        }
    }
}

impl Commands {
    /// Whether the command talks to the reservation service
    fn uses_service(&self) -> bool {
        !matches!(self, Commands::Quote { .. })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CommandLine::parse();

    let mut config = ClientConfig::from_env().context("failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    logger::init_logger(&config.log_level, config.log_json)?;

    let calculator = StayCalculator::new(config.rate_table()?);
    let mut gateway = config.build_gateway()?;

    if cli.command.uses_service() {
        if let (Some(username), Some(password)) = (&cli.username, &cli.password) {
            gateway.login(username, password).await?;
        }
    }

    match cli.command {
        Commands::Quote {
            room,
            check_in,
            check_out,
            guests,
        } => {
            let period = StayPeriod::new(check_in, check_out)?;
            let quote =
                calculator.breakdown(room, &period, StayCalculator::parse_guest_count(&guests));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("{} - {}", room, room.description());
                println!("Price per night:          {}", format_currency(quote.rate_per_night));
                println!("Guests:                   {}", quote.guests);
                println!("Per person per night:     {}", format_currency(quote.per_guest_per_night));
                println!("Nights:                   {}", quote.nights);
                println!("Total:                    {}", format_currency(quote.total));
            }
        }
        Commands::Login => {
            // The login itself happened above
            let Some(username) = cli.username.filter(|_| cli.password.is_some()) else {
                bail!("login needs --username and --password");
            };
            let token = gateway.token().context("no token issued")?;
            if cli.json {
                println!("{}", serde_json::json!({ "username": username, "token": token }));
            } else {
                println!("{token}");
            }
        }
        Commands::Guide => {
            println!("{}", gateway.help().await?);
        }
        Commands::List => {
            let reservations = gateway.list().await?;
            print_list(&reservations, cli.json)?;
        }
        Commands::Show { reservation_number } => {
            let reservation = gateway.get(&reservation_number).await?;
            print_detail(&reservation, cli.json)?;
        }
        Commands::Search { name } => {
            let reservations = gateway.search(&name).await?;
            print_list(&reservations, cli.json)?;
        }
        Commands::Book(args) => {
            let created = book(&gateway, &calculator, &args, cli.json).await?;
            print_detail(&created, cli.json)?;
        }
        Commands::Edit(args) => {
            let current = gateway.get(&args.reservation_number).await?;
            let mut request = current.to_request();
            args.apply(&mut request);
            request.validate_for_booking(Local::now().date_naive())?;
            let updated = gateway.update_checked(&current, &request).await?;
            print_detail(&updated, cli.json)?;
        }
        Commands::CheckIn { reservation_number } => {
            let updated =
                change_status(&gateway, &reservation_number, ReservationStatus::CheckedIn).await?;
            print_detail(&updated, cli.json)?;
        }
        Commands::CheckOut { reservation_number } => {
            let updated =
                change_status(&gateway, &reservation_number, ReservationStatus::CheckedOut).await?;
            print_detail(&updated, cli.json)?;
        }
        Commands::NoShow { reservation_number } => {
            let updated =
                change_status(&gateway, &reservation_number, ReservationStatus::NoShow).await?;
            print_detail(&updated, cli.json)?;
        }
        Commands::Cancel { reservation_number } => {
            let current = gateway.get(&reservation_number).await?;
            let cancelled = gateway.cancel(&current).await?;
            print_detail(&cancelled, cli.json)?;
        }
        Commands::Report { limit } => {
            let reservations = gateway.list().await?;
            let report = ReservationReport::from_reservations(&reservations, limit);
            print_report(&report, cli.json)?;
        }
    }

    Ok(())
}

async fn book(
    gateway: &NetworkGateway,
    calculator: &StayCalculator,
    args: &BookArgs,
    json: bool,
) -> Result<Reservation> {
    let request = args.to_request();
    let period = request.validate_for_booking(Local::now().date_naive())?;
    if !json {
        let quote =
            calculator.breakdown(request.room_type, &period, i64::from(request.number_of_guests));
        println!(
            "{} nights x {} = {}",
            quote.nights,
            format_currency(quote.rate_per_night),
            format_currency(quote.total)
        );
    }

    let created = if args.public {
        gateway.create_public(&request).await?
    } else {
        gateway.create(&request).await?
    };
    Ok(created)
}

async fn change_status(
    gateway: &NetworkGateway,
    reservation_number: &str,
    to: ReservationStatus,
) -> Result<Reservation> {
    let current = gateway.get(reservation_number).await?;
    Ok(gateway.change_status(&current, to).await?)
}

fn print_list(reservations: &[Reservation], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reservations)?);
        return Ok(());
    }
    if reservations.is_empty() {
        println!("No reservations found");
        return Ok(());
    }
    println!(
        "{:<18} {:<24} {:<13} {:<10} {:<10} {:<12} {:>16}",
        "NUMBER", "GUEST", "ROOM", "CHECK-IN", "CHECK-OUT", "STATUS", "TOTAL"
    );
    for r in reservations {
        println!(
            "{:<18} {:<24} {:<13} {:<10} {:<10} {:<12} {:>16}",
            r.reservation_number,
            r.guest_name,
            r.room_type,
            r.check_in_date.format("%d/%m/%Y").to_string(),
            r.check_out_date.format("%d/%m/%Y").to_string(),
            r.status.label(),
            format_currency(r.total_amount.unwrap_or_default()),
        );
    }
    Ok(())
}

fn print_detail(r: &Reservation, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(r)?);
        return Ok(());
    }
    let actions: Vec<_> = ReservationLifecycle::available_actions(r.status)
        .into_iter()
        .map(|a| a.label())
        .collect();

    println!("Reservation:   {}", r.reservation_number);
    println!("Guest:         {}", r.guest_name);
    println!("Address:       {}", r.address);
    println!("Contact:       {}", r.contact_number);
    if let Some(email) = &r.email {
        println!("Email:         {email}");
    }
    println!("Room:          {} ({})", r.room_type, r.room_type.description());
    println!(
        "Stay:          {} to {} ({} nights)",
        r.check_in_date.format("%d/%m/%Y"),
        r.check_out_date.format("%d/%m/%Y"),
        r.number_of_nights
    );
    if let Some(guests) = r.number_of_guests {
        println!("Guests:        {guests}");
    }
    if let Some(requests) = r.special_requests.as_deref().filter(|s| !s.is_empty()) {
        println!("Requests:      {requests}");
    }
    println!(
        "Total:         {}",
        format_currency(r.total_amount.unwrap_or_default())
    );
    println!("Status:        {}", r.status.label());
    println!("Actions:       {}", actions.join(", "));
    Ok(())
}

fn print_report(report: &ReservationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("Total bookings: {}", report.total);
    for status in ReservationStatus::ALL {
        println!("  {:<12} {}", status.label(), report.count(status));
    }
    println!();
    println!("{:<13} {:>8} {:>18}", "ROOM TYPE", "BOOKINGS", "REVENUE");
    for row in &report.revenue_by_category {
        println!(
            "{:<13} {:>8} {:>18}",
            row.category,
            row.count,
            format_currency(row.revenue)
        );
    }
    println!("Total revenue: {}", format_currency(report.total_revenue));
    println!();
    println!("Recent reservations:");
    print_list(&report.recent, false)
}
