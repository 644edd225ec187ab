
#[cfg(test)]
mod scope_balance_test;



#[cfg(test)]
mod common;
