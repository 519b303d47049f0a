mod testing;
mod wallet;

pub use testing::SomeTestParams;
pub use wallet::SomeTestWallet;
