//! Range checks shared by the request types

use crate::error::Error;

pub(crate) fn positive(
  parameter: &str
, value: Option<u32>
) -> Result<(), Error>
{   match value
    {   Some(0) => Err(Error::invalid(
          parameter,
          "must be a positive integer"
        ))
      , _ => Ok(())
    }
}

pub(crate) fn unit_interval(
  parameter: &str
, value: Option<f64>
) -> Result<(), Error>
{   match value
    {   Some(v) if !(0.0..=1.0).contains(&v) => Err(Error::invalid(
          parameter,
          format!("must be between 0.0 and 1.0, got {}", v)
        ))
      , _ => Ok(())
    }
}

pub(crate) fn finite(
  parameter: &str
, value: Option<f64>
) -> Result<(), Error>
{   match value
    {   Some(v) if !v.is_finite() => Err(Error::invalid(
          parameter,
          format!("must be a finite number, got {}", v)
        ))
      , _ => Ok(())
    }
}

pub(crate) fn non_empty_str(
  parameter: &str
, value: &str
) -> Result<(), Error>
{   if value.is_empty()
    {   return Err(Error::invalid(parameter, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn non_empty_list<T>(
  parameter: &str
, value: &[T]
) -> Result<(), Error>
{   if value.is_empty()
    {   return Err(Error::invalid(
          parameter,
          "must contain at least one element"
        ));
    }
    Ok(())
}
