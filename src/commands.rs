//! Command handlers

use std::io;

use anyhow::Result;
use tracing::{info, warn};

use storefront::{catalog::Catalog, session::Session};

/// Print the catalog, one table per section.
pub fn catalog(catalog: &Catalog, out: impl io::Write) -> Result<()> {
    catalog.write_to(out)?;

    Ok(())
}

/// Replay a shopping session and print the checkout summary.
///
/// Adds are applied in order, then removes.
pub fn checkout(
    catalog: Catalog,
    add: &[String],
    remove: &[String],
    out: impl io::Write,
) -> Result<()> {
    let mut session = Session::new(catalog);

    for id in add {
        session.add_to_cart(id)?;
    }

    for id in remove {
        if session.cart().get(id).is_none() {
            warn!(product = %id, "product not in cart, nothing to remove");
        }

        session.remove_from_cart(id);
    }

    let summary = session.checkout()?;

    info!(
        lines = summary.lines().len(),
        items = summary.item_count(),
        total = %summary.total(),
        "checkout ready"
    );

    summary.write_to(out)?;

    Ok(())
}
