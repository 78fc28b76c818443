//! `SeaORM` entity definitions.

pub mod obligations;
pub mod payments;
pub mod sea_orm_active_enums;
