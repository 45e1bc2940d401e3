//! Daily history text format
//!
//! ```text
//! Pedido 1
//! Cliente: Mesa 3
//! Total: R$ 38.00
//! Itens:
//!     - Hamburguer Tradicional (x2) - R$ 22.00
//!     - Cheddar (x1) - R$ 16.00
//!
//! ```
//!
//! Every block ends with a blank line and blocks are joined with one more
//! newline. Consumers depend on this layout byte for byte.

use shared::HistoryRecord;
use shared::money::format_brl;

/// Default name of the exported file
pub const EXPORT_FILE_NAME: &str = "historico_diario.txt";

/// Render one history record at 1-based `position`
fn render_record(position: usize, record: &HistoryRecord) -> String {
    let items = record
        .lines
        .iter()
        .map(|line| {
            format!(
                "    - {} (x{}) - {}",
                line.name,
                line.quantity,
                format_brl(line.line_total())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Pedido {}\nCliente: {}\nTotal: {}\nItens:\n{}\n\n",
        position,
        record.client_label,
        format_brl(record.total),
        items
    )
}

/// Render the whole history in export format
pub fn render_history(records: &[HistoryRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| render_record(idx + 1, record))
        .collect::<Vec<_>>()
        .join("\n")
}
