pub mod green_investment;
