// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use chrono::{Local, TimeZone};

use crate::{error::LocalTimeConversionError, value::LocalFields};

pub fn local_fields(secs: i64) -> Result<LocalFields, LocalTimeConversionError> {
    let local = Local
        .timestamp_opt(secs, 0)
        .earliest()
        .ok_or(LocalTimeConversionError::new(secs))?;
    Ok(LocalFields::from_naive(&local.naive_local()))
}
