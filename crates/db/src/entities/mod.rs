//! `SeaORM` entity definitions.

pub mod clients;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod sea_orm_active_enums;
pub mod sequences;
pub mod suppliers;
