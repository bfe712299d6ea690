use clap::Args;
use jiff::Timestamp;
use portal_app::domain::customers::records::CustomerUuid;
use uuid::Uuid;

use super::PortalServiceArgs;

#[derive(Debug, Args)]
pub(crate) struct IssueArgs {
    #[command(flatten)]
    service: PortalServiceArgs,

    /// Customer the link grants access for
    #[arg(long)]
    customer_uuid: Uuid,

    /// Recipient email address
    #[arg(long)]
    email: String,

    /// Email the link instead of only printing it
    #[arg(long)]
    send: bool,
}

pub(crate) async fn run(args: IssueArgs) -> Result<(), String> {
    let app = args.service.connect().await?;
    let links = args.service.links();
    let customer = CustomerUuid::from_uuid(args.customer_uuid);
    let now = Timestamp::now();

    if args.send {
        let sent = app
            .portal
            .send_access_link(customer, &args.email, now)
            .await
            .map_err(|error| format!("failed to send access link: {error}"))?;

        println!("access_uuid: {}", sent.access.uuid);
        println!("expires_at: {}", sent.access.expires_at);
        println!("access_link: {}", sent.access_link);
        println!("access link emailed to {}", sent.access.email);

        return Ok(());
    }

    let issued = app
        .portal
        .issue_access(customer, &args.email, now)
        .await
        .map_err(|error| format!("failed to issue access: {error}"))?;

    println!("access_uuid: {}", issued.access.uuid);
    println!("expires_at: {}", issued.access.expires_at);
    println!("access_link: {}", links.access_link(&issued.token));
    println!("store this link now; the token is only shown once");

    Ok(())
}
