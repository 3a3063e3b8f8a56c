use crate::schemas::BillRecord;

const CURRENCY: &str = "THB";

pub fn render_bill(bill: &BillRecord) -> String {
    let mut content = String::from("===== Bill Summary =====\n");
    content.push_str(&format!("Created: {}\n\n", bill.timestamp));

    for person in &bill.results {
        content.push_str(&format!("{}: {} {:.2}\n", person.name, CURRENCY, person.amount));
    }

    content.push_str(&format!("\nTotal Bill: {} {:.2}\n", CURRENCY, bill.total));
    content.push_str("=========================\n");
    content
}

pub fn attachment_name(bill_id: &str) -> String {
    format!("bill_{}.txt", bill_id)
}
