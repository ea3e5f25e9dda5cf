// Ether amount parsing and formatting

use super::WalletError;

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
/// Wei in one unit of the fourth decimal place
const WEI_PER_DISPLAY_UNIT: u128 = WEI_PER_ETHER / 10_000;

/// Parse a JSON-RPC hex quantity such as `"0x1bc16d674ec80000"`
pub fn parse_quantity(hex: &str) -> Result<u128, WalletError> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .ok_or_else(|| WalletError::InvalidResponse(format!("not a hex quantity: {}", hex)))?;

    if digits.is_empty() {
        return Ok(0);
    }

    u128::from_str_radix(digits, 16)
        .map_err(|e| WalletError::InvalidResponse(format!("bad quantity {}: {}", hex, e)))
}

/// Full-precision ether amount, always with at least one decimal ("1.0", "0.25")
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = wei % WEI_PER_ETHER;

    let fraction = format!("{:018}", fraction);
    let trimmed = fraction.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

/// Balance as shown in the wallet window: four decimals, rounded half up
pub fn display_balance(wei: u128) -> String {
    let units = wei / WEI_PER_DISPLAY_UNIT
        + u128::from(wei % WEI_PER_DISPLAY_UNIT >= WEI_PER_DISPLAY_UNIT / 2);
    format!("{}.{:04} ETH", units / 10_000, units % 10_000)
}
