// IOU ledger: bilateral debt records, transition validation and construction
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License. You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! Currency-denominated amounts expressed in integer minor units.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::ConstructionError;

#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum AmountParseError {
    /// '{0}' is not a valid currency code; three upper-case latin letters are expected.
    InvalidCurrency(String),

    /// '{0}' is not a valid amount; the expected form is `<minor units> <currency>`, like
    /// `1000 GBP`.
    InvalidAmount(String),
}

/// Three-letter currency code, like `GBP` or `USD`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "String", into = "String")
)]
pub struct Currency(String);

impl Currency {
    pub fn as_str(&self) -> &str { &self.0 }
}

impl FromStr for Currency {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(AmountParseError::InvalidCurrency(s.to_owned()));
        }
        Ok(Currency(s.to_owned()))
    }
}

impl TryFrom<String> for Currency {
    type Error = AmountParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> { Currency::from_str(&s) }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self { currency.0 }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Non-negative quantity of some currency, counted in minor units (pence, cents).
///
/// Amounts of different currencies never mix: every arithmetic operation checks the currency
/// first and fails with [`ConstructionError::CurrencyMismatch`] otherwise. For the same reason
/// the type doesn't implement `PartialOrd`; compare [`Amount::quantity`] once currencies are known
/// to match.
#[derive(Getters, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct Amount {
    #[getter(skip)]
    quantity: u64,
    currency: Currency,
}

impl Amount {
    pub fn new(quantity: u64, currency: Currency) -> Self { Amount { quantity, currency } }

    pub fn zero(currency: Currency) -> Self { Amount::new(0, currency) }

    #[inline]
    pub fn quantity(&self) -> u64 { self.quantity }

    #[inline]
    pub fn is_zero(&self) -> bool { self.quantity == 0 }

    #[inline]
    pub fn is_positive(&self) -> bool { self.quantity > 0 }

    pub fn is_same_currency(&self, other: &Amount) -> bool { self.currency == other.currency }

    fn ensure_currency(&self, other: &Amount) -> Result<(), ConstructionError> {
        if !self.is_same_currency(other) {
            return Err(ConstructionError::CurrencyMismatch {
                expected: self.currency.clone(),
                found: other.currency.clone(),
            });
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Amount) -> Result<Amount, ConstructionError> {
        self.ensure_currency(other)?;
        let quantity = self
            .quantity
            .checked_add(other.quantity)
            .ok_or(ConstructionError::Overflow)?;
        Ok(Amount::new(quantity, self.currency.clone()))
    }

    pub fn checked_sub(&self, other: &Amount) -> Result<Amount, ConstructionError> {
        self.ensure_currency(other)?;
        let quantity = self
            .quantity
            .checked_sub(other.quantity)
            .ok_or(ConstructionError::Overflow)?;
        Ok(Amount::new(quantity, self.currency.clone()))
    }

    /// Subtracts `other` stopping at zero. Quantities of a different currency are not
    /// subtracted at all.
    pub fn saturating_sub(&self, other: &Amount) -> Amount {
        if !self.is_same_currency(other) {
            return self.clone();
        }
        Amount::new(self.quantity.saturating_sub(other.quantity), self.currency.clone())
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.currency)
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| AmountParseError::InvalidAmount(s.to_owned()))?;
        let (digits, currency) = s.split_at(split);
        let quantity = digits
            .parse()
            .map_err(|_| AmountParseError::InvalidAmount(s.to_owned()))?;
        let currency = currency.trim_start().parse()?;
        Ok(Amount::new(quantity, currency))
    }
}
