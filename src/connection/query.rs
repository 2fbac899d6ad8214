//! `COM_QUERY` dispatch: send the command, then classify and drive whatever response shape the
//! server sends back.

use std::time::Instant;

use crate::connection::stream::Stream;
use crate::connection::{ConnectionEvents, QueryEnd, ServerErrorEvent};
use crate::error::Error;
use crate::options::ConnectOptions;
use crate::protocol::{self, Capabilities, ColumnDefinition, EofPacket, ErrPacket, OkPacket};

const LOCAL_INFILE_HEADER: u8 = 0xFB;
const ERR_HEADER: u8 = 0xFF;
const OK_HEADER: u8 = 0x00;

pub fn run(
    stream: &mut Stream,
    options: &ConnectOptions,
    capabilities: Capabilities,
    sql: &str,
    events: &mut dyn ConnectionEvents,
    deadline: Option<Instant>,
) -> Result<(), Error> {
    stream.reset_sequence();
    stream.write_packet(&protocol::encode_com_query(sql))?;

    loop {
        let packet = stream.read_packet(deadline)?.to_vec();

        match packet.first().copied() {
            Some(OK_HEADER) => {
                let ok = OkPacket::read(&packet)?;
                emit_end(events, &ok);

                if !(options.multi_statements && ok.status.contains(protocol::ServerStatus::MORE_RESULTS_EXISTS)) {
                    return Ok(());
                }
            }

            Some(ERR_HEADER) => {
                let err = ErrPacket::read(&packet)?;
                emit_error(events, &err);
                return Ok(());
            }

            Some(LOCAL_INFILE_HEADER) => {
                // decline: a zero-length packet tells the server we won't be sending a file
                stream.write_packet(&[])?;
                let reply = stream.read_packet(deadline)?.to_vec();

                match reply.first().copied() {
                    Some(OK_HEADER) => {
                        let ok = OkPacket::read(&reply)?;
                        emit_end(events, &ok);
                        if !(options.multi_statements && ok.status.contains(protocol::ServerStatus::MORE_RESULTS_EXISTS)) {
                            return Ok(());
                        }
                    }

                    Some(ERR_HEADER) => {
                        let err = ErrPacket::read(&reply)?;
                        emit_error(events, &err);
                        return Ok(());
                    }

                    _ => return Err(protocol_err!("expected OK or ERR after declining LOCAL INFILE")),
                }
            }

            Some(_) => {
                if !read_result_set(stream, options, capabilities, &packet, events, deadline)? {
                    return Ok(());
                }
            }

            None => return Err(protocol_err!("received an empty packet where a response was expected")),
        }
    }
}

/// Reads one full result set (columns, then rows, then its terminator) given the already-read
/// column-count packet. Returns `true` if another result set follows (multi-statements).
fn read_result_set(
    stream: &mut Stream,
    options: &ConnectOptions,
    capabilities: Capabilities,
    column_count_packet: &[u8],
    events: &mut dyn ConnectionEvents,
    deadline: Option<Instant>,
) -> Result<bool, Error> {
    let column_count = protocol::read_column_count(column_count_packet)? as usize;

    let mut columns = Vec::with_capacity(column_count);
    for _ in 0..column_count {
        let packet = stream.read_packet(deadline)?;
        columns.push(ColumnDefinition::read(packet)?);
    }

    if !capabilities.contains(Capabilities::DEPRECATE_EOF) {
        let packet = stream.read_packet(deadline)?.to_vec();
        EofPacket::read(&packet)?;
    }

    events.on_fields(columns.clone());

    loop {
        let packet = stream.read_packet(deadline)?.to_vec();

        // Only a `0xFE` header ends the row phase. Under `CLIENT_DEPRECATE_EOF` the terminator is
        // an OK packet that the server always gives a `0xFE` header (not `0x00`) specifically so
        // it can't be confused with a data row whose first column happens to be empty.
        let is_terminator = if capabilities.contains(Capabilities::DEPRECATE_EOF) {
            packet.first() == Some(&0xFE)
        } else {
            EofPacket::is_eof_header(&packet)
        };

        if is_terminator {
            let status = if capabilities.contains(Capabilities::DEPRECATE_EOF) {
                let ok = OkPacket::read(&packet)?;
                emit_end(events, &ok);
                ok.status
            } else {
                let eof = EofPacket::read(&packet)?;
                emit_end(
                    events,
                    &OkPacket {
                        affected_rows: 0,
                        last_insert_id: 0,
                        status: eof.status,
                        warnings: eof.warnings,
                    },
                );
                eof.status
            };

            return Ok(options.multi_statements && status.contains(protocol::ServerStatus::MORE_RESULTS_EXISTS));
        }

        if packet.first() == Some(&ERR_HEADER) {
            let err = ErrPacket::read(&packet)?;
            emit_error(events, &err);
            return Ok(false);
        }

        let row = protocol::read_row(&packet, column_count)?;
        events.on_row(row);
    }
}

fn emit_end(events: &mut dyn ConnectionEvents, ok: &OkPacket) {
    events.on_end(QueryEnd {
        affected_rows: ok.affected_rows,
        last_insert_id: ok.last_insert_id,
        warnings_count: ok.warnings,
        status: ok.status,
    });
}

fn emit_error(events: &mut dyn ConnectionEvents, err: &ErrPacket) {
    events.on_error(ServerErrorEvent {
        error_code: err.error_code,
        sql_state: err.sql_state.clone(),
        error_message: err.error_message.clone(),
    });
}
