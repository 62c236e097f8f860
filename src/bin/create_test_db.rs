use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use algamoney_rs::{
    Address, CategoryName, NewPerson, Transaction, TransactionType, create_category,
    create_person, create_transaction, initialize_db,
};

/// A utility for creating a test database for the REST API server of algamoney_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating categories...");
    let mut category_ids = Vec::new();
    for name in ["Lazer", "Alimentação", "Supermercado", "Farmácia", "Outros"] {
        let category = create_category(CategoryName::new(name)?, &conn)?;
        category_ids.push(category.id);
    }

    println!("Creating people...");
    let maria = create_person(
        NewPerson::build("Maria Rita", true).address(Address {
            street: Some("Rua do Sol".to_owned()),
            number: Some("100".to_owned()),
            complement: Some("Apto 12".to_owned()),
            district: Some("Centro".to_owned()),
            postal_code: Some("38.400-121".to_owned()),
            city: Some("Uberlândia".to_owned()),
            state: Some("MG".to_owned()),
        }),
        &conn,
    )?;
    let pedro = create_person(NewPerson::build("Pedro Santos", true), &conn)?;
    create_person(NewPerson::build("Ricardo Pereira", false), &conn)?;

    println!("Creating transactions...");
    let transactions = [
        Transaction::build(
            "Salário mensal",
            date!(2024 - 06 - 10),
            6500.0,
            TransactionType::Income,
            category_ids[4],
            maria.id,
        )
        .payment_date(Some(date!(2024 - 06 - 10)))
        .notes(Some("Distribuição de lucros")),
        Transaction::build(
            "Bahamas",
            date!(2024 - 02 - 10),
            100.32,
            TransactionType::Expense,
            category_ids[1],
            maria.id,
        )
        .payment_date(Some(date!(2024 - 02 - 10))),
        Transaction::build(
            "Top Club",
            date!(2024 - 06 - 10),
            120.0,
            TransactionType::Income,
            category_ids[0],
            pedro.id,
        ),
        Transaction::build(
            "CEMIG",
            date!(2024 - 02 - 10),
            110.44,
            TransactionType::Income,
            category_ids[4],
            pedro.id,
        )
        .payment_date(Some(date!(2024 - 02 - 10)))
        .notes(Some("Geração")),
        Transaction::build(
            "Despachante",
            date!(2024 - 06 - 10),
            200.30,
            TransactionType::Expense,
            category_ids[2],
            maria.id,
        ),
        Transaction::build(
            "Farmácia do Povo",
            date!(2024 - 04 - 10),
            40.0,
            TransactionType::Expense,
            category_ids[3],
            pedro.id,
        )
        .payment_date(Some(date!(2024 - 04 - 11))),
    ];

    for transaction in transactions {
        create_transaction(transaction, &conn)?;
    }

    println!("Success!");

    Ok(())
}
