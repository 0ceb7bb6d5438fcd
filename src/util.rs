//! Attribute helpers shared by every pass that reads or tags graph layout.
//!
//! All attribute reads go through [`get_arg`] so lookup semantics stay uniform:
//! linear scan, first match wins, absence is `None`.

use log::debug;

use crate::enums::{DataFormat, EnumDomain, FilterFormat};
use crate::graph::{ArgValue, Argument, HasArgs, NetDef, OperatorDef};
use crate::keywords;

pub fn get_arg<'a, H>(holder: &'a H, name: &str) -> Option<&'a Argument>
where
    H: HasArgs + ?Sized,
{
    holder.args().iter().find(|arg| arg.name == name)
}

/// Overwrites the first argument named `name`, or appends one.
pub fn set_arg<H>(holder: &mut H, name: &str, value: impl Into<ArgValue>)
where
    H: HasArgs + ?Sized,
{
    let value = value.into();
    match holder.args_mut().iter_mut().find(|arg| arg.name == name) {
        Some(existing) => {
            debug!("overwriting `{}`: {:?} -> {:?}", name, existing.value, value);
            existing.value = value;
        }
        None => holder.args_mut().push(Argument::new(name, value)),
    }
}

/// Decodes an integer argument into an enumerant. Absent, non-integer and
/// out-of-domain values all read as `None`.
pub fn enum_arg<E, H>(holder: &H, name: &str) -> Option<E>
where
    E: EnumDomain,
    H: HasArgs + ?Sized,
{
    let arg = get_arg(holder, name)?;
    let value = arg.value.as_int()?;
    let decoded = E::decode(value);
    if decoded.is_none() {
        debug!("`{}` holds {} which is not a valid {}", name, value, E::DOMAIN);
    }
    decoded
}

pub fn set_enum_arg<E, H>(holder: &mut H, name: &str, value: E)
where
    E: EnumDomain,
    H: HasArgs + ?Sized,
{
    set_arg(holder, name, i64::from(value.discriminant()));
}

/// Appends a data format tag to a freshly built operator.
pub fn add_data_format_arg(op: &mut OperatorDef, data_format: DataFormat) {
    op.add_arg(
        keywords::DATA_FORMAT,
        i64::from(data_format.discriminant()),
    );
}

pub fn set_data_format<H: HasArgs + ?Sized>(holder: &mut H, data_format: DataFormat) {
    set_enum_arg(holder, keywords::DATA_FORMAT, data_format);
}

pub fn data_format<H: HasArgs + ?Sized>(holder: &H) -> Option<DataFormat> {
    enum_arg(holder, keywords::DATA_FORMAT)
}

pub fn set_filter_format(net: &mut NetDef, filter_format: FilterFormat) {
    set_enum_arg(net, keywords::FILTER_FORMAT, filter_format);
}

pub fn filter_format(net: &NetDef) -> Option<FilterFormat> {
    enum_arg(net, keywords::FILTER_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::OperatorKind;

    #[test]
    fn filter_format_absent_on_fresh_graph() {
        let net = NetDef::new("empty");
        assert_eq!(filter_format(&net), None);
        assert_eq!(data_format(&net), None);
    }

    #[test]
    fn filter_format_is_last_write_wins() {
        let mut net = NetDef::new("net");
        set_filter_format(&mut net, FilterFormat::Oihw);
        set_filter_format(&mut net, FilterFormat::Hwio);
        assert_eq!(filter_format(&net), Some(FilterFormat::Hwio));
        assert_eq!(net.args.len(), 1);
    }

    #[test]
    fn unknown_discriminant_decodes_as_none() {
        let mut net = NetDef::new("net");
        net.add_arg(keywords::FILTER_FORMAT, 9);
        assert_eq!(filter_format(&net), None);

        let mut op = OperatorDef::new("pool", OperatorKind::Pooling);
        op.add_arg(keywords::DATA_FORMAT, "NHWC");
        assert_eq!(data_format(&op), None);
    }

    #[test]
    fn data_format_applies_to_node_and_graph() {
        let mut net = NetDef::new("net");
        let mut op = OperatorDef::new("softmax", OperatorKind::Softmax);

        set_data_format(&mut net, DataFormat::Nhwc);
        set_data_format(&mut op, DataFormat::Nchw);
        set_data_format(&mut op, DataFormat::Nhwc);

        assert_eq!(data_format(&net), Some(DataFormat::Nhwc));
        assert_eq!(data_format(&op), Some(DataFormat::Nhwc));
        assert_eq!(op.args.len(), 1);
    }

    #[test]
    fn add_data_format_arg_appends() {
        let mut op = OperatorDef::new("conv", OperatorKind::Conv2D);
        add_data_format_arg(&mut op, DataFormat::Nchw);
        add_data_format_arg(&mut op, DataFormat::Nhwc);
        assert_eq!(op.args.len(), 2);
        assert_eq!(data_format(&op), Some(DataFormat::Nchw));
    }

    #[test]
    fn get_arg_returns_first_match() {
        let mut op = OperatorDef::new("pad", OperatorKind::Pad);
        op.add_arg(keywords::PADDINGS, vec![0i64, 0, 1, 1]);
        op.add_arg(keywords::PADDINGS, vec![2i64, 2, 2, 2]);
        let arg = get_arg(&op, keywords::PADDINGS).unwrap();
        assert_eq!(arg.value.as_ints(), Some(&[0i64, 0, 1, 1][..]));
        assert!(get_arg(&op, keywords::AXIS).is_none());
    }
}
