//! Cart Repositories

mod carts;
mod items;

pub(crate) use carts::PgCartsRepository;
pub(crate) use items::{PgCartItemsRepository, ProductSnapshot};
