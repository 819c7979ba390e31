// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::mem::MaybeUninit;

use crate::{error::LocalTimeConversionError, value::LocalFields};

pub fn local_fields(secs: i64) -> Result<LocalFields, LocalTimeConversionError> {
    let error = || LocalTimeConversionError::new(secs);

    let time = libc::time_t::try_from(secs).map_err(|_| error())?;
    let mut tm = MaybeUninit::<libc::tm>::uninit();
    // SAFETY: `time` and `tm` are valid pointers for the duration of the call.
    let res = unsafe { libc::localtime_r(&time, tm.as_mut_ptr()) };
    if res.is_null() {
        return Err(error());
    }
    // SAFETY: `localtime_r` returned non-null, so `tm` is initialized.
    let tm = unsafe { tm.assume_init() };

    Ok(LocalFields {
        year: tm.tm_year.checked_add(1900).ok_or_else(error)?,
        month: (tm.tm_mon + 1) as u8,
        day: tm.tm_mday as u8,
        hour: tm.tm_hour as u8,
        minute: tm.tm_min as u8,
        second: tm.tm_sec as u8,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range() {
        // No platform represents this year in a 32-bit `tm_year`.
        let err = local_fields(i64::MAX).unwrap_err();
        assert_eq!(err.timestamp(), i64::MAX);
    }
}
