#[actix_web::main]
async fn main() -> std::io::Result<()> {
    hr_letters_server::run().await
}
